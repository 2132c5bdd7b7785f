//! Fixed selection catalogs offered to the user as checklist options.

use serde::Serialize;

pub const SKILLS: &[&str] = &[
    "AI", "ML", "NLP", "Generative AI", "MEARN Stack", "Full Stack", "PHP", "Laravel", "Node.js",
    "Transflow", "Python", "Microsoft Dynamics", "Oracle Netsuit", "Deep Learning", "React",
    "Angular", "Vue.js", "TypeScript", "JavaScript", "Java", "C#", "C++", "Go", "Rust", "Kotlin",
    "Swift", "Dart", "Flutter", "Spring Boot", "ASP.NET", "Ruby on Rails", "SQL", "MySQL",
    "PostgreSQL", "MongoDB", "Firebase", "Redis", "GraphQL", "REST API", "Docker", "Kubernetes",
    "AWS", "Azure", "Google Cloud", "CI/CD", "Git", "Jenkins", "Terraform", "Ansible", "Linux",
    "Bash", "PowerShell", "Agile", "Scrum", "JIRA", "Confluence", "Data Science", "Big Data",
    "Hadoop", "Spark", "Pandas", "NumPy", "TensorFlow", "PyTorch", "OpenCV", "Matplotlib",
    "Scikit-learn", "LLMs", "ChatGPT API", "Prompt Engineering", "LangChain", "Vector DBs",
    "Pinecone", "Qdrant", "Weaviate", "Cybersecurity", "Penetration Testing", "Ethical Hacking",
    "SIEM", "SOC", "DevSecOps", "ISO 27001", "Blockchain", "Solidity", "Smart Contracts",
    "Web3.js", "NFTs", "Metaverse", "Digital Twins", "IoT", "Edge Computing",
    "Robotic Process Automation", "Power BI", "Tableau", "Looker", "Salesforce", "HubSpot",
    "Shopify", "WordPress",
];

pub const CERTIFICATIONS: &[(&str, &[&str])] = &[
    ("HR", &["SHRM-CP", "SHRM-SCP", "PHR", "SPHR", "aPHR"]),
    (
        "IT",
        &["CompTIA A+", "Azure Fundamentals", "AWS Cloud Practitioner", "Google IT Support", "CCNA"],
    ),
    ("Cybersecurity", &["Security+", "CEH", "CISSP", "CISM", "GSEC"]),
    ("Finance", &["ACCA", "CPA", "CFA", "CIMA", "CMA"]),
    ("Project Management", &["PMP", "PRINCE2", "CAPM", "PMI-ACP", "Scrum Master"]),
];

pub const EDUCATION: &[&str] = &["Bachelor's", "Master's", "Above Master's"];

#[derive(Debug, Clone, Serialize)]
pub struct CertificationCategory {
    pub category: &'static str,
    pub items: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub skills: &'static [&'static str],
    pub certifications: Vec<CertificationCategory>,
    pub education: &'static [&'static str],
}

pub fn catalog() -> Catalog {
    Catalog {
        skills: SKILLS,
        certifications: CERTIFICATIONS
            .iter()
            .map(|&(category, items)| CertificationCategory { category, items })
            .collect(),
        education: EDUCATION,
    }
}
