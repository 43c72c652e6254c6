//! Static course catalog. Seeded at compile time, never mutated.

use crate::models::Course;

const PCM_ELIGIBILITY: &str = "12th Standard with Physics, Chemistry, and Mathematics (PCM)";

pub const COURSES: &[Course] = &[
    Course {
        id: "CSE-001",
        name: "B.E. Computer Science and Engineering",
        department: "Engineering",
        duration: "4 Years",
        description: "Specialized study in software development, cloud computing, and cybersecurity.",
        eligibility: PCM_ELIGIBILITY,
        image: "https://images.unsplash.com/photo-1517694712202-14dd9538aa97?auto=format&fit=crop&q=80&w=600",
    },
    Course {
        id: "AI-001",
        name: "B.Tech Artificial Intelligence & Data Science",
        department: "Technology",
        duration: "4 Years",
        description: "Focusing on machine learning, neural networks, and big data analytics.",
        eligibility: PCM_ELIGIBILITY,
        image: "https://images.unsplash.com/photo-1555255707-c0796c88bc22?auto=format&fit=crop&q=80&w=600",
    },
    Course {
        id: "ECE-001",
        name: "B.E. Electronics & Communication",
        department: "Engineering",
        duration: "4 Years",
        description: "Expertise in VLSI design, wireless communication, and embedded systems.",
        eligibility: PCM_ELIGIBILITY,
        image: "https://images.unsplash.com/photo-1518770660439-4636190af475?auto=format&fit=crop&q=80&w=600",
    },
    Course {
        id: "MECH-001",
        name: "B.E. Mechanical Engineering",
        department: "Engineering",
        duration: "4 Years",
        description: "Core concepts in thermodynamics, robotics, and advanced manufacturing.",
        eligibility: PCM_ELIGIBILITY,
        image: "https://images.unsplash.com/photo-1537462715879-360eeb61a0ad?auto=format&fit=crop&q=80&w=600",
    },
    Course {
        id: "CIV-001",
        name: "B.E. Civil Engineering",
        department: "Engineering",
        duration: "4 Years",
        description: "Design and construction of infrastructure, urban planning, and structural analysis.",
        eligibility: PCM_ELIGIBILITY,
        image: "https://images.unsplash.com/photo-1581094794329-c8112a89af12?auto=format&fit=crop&q=80&w=600",
    },
    Course {
        id: "IT-001",
        name: "B.Tech Information Technology",
        department: "Technology",
        duration: "4 Years",
        description: "Focus on network administration, web technologies, and database management.",
        eligibility: PCM_ELIGIBILITY,
        image: "https://images.unsplash.com/photo-1519389950473-47ba0277781c?auto=format&fit=crop&q=80&w=600",
    },
];

pub fn all() -> &'static [Course] {
    COURSES
}

pub fn find(id: &str) -> Option<&'static Course> {
    COURSES.iter().find(|c| c.id == id)
}

pub fn contains(id: &str) -> bool {
    find(id).is_some()
}
