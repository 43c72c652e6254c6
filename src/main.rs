#[tokio::main]
async fn main() {
    if let Err(e) = admissions_lib::run().await {
        eprintln!("admissions-portal: {e}");
        std::process::exit(1);
    }
}
