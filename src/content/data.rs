//! Shipped portfolio content.

use super::{ContactLink, Experience, Project, SiteContent, SkillLevel, SkillPin};
use crate::types::NavItem;

pub fn default_nav_items() -> Vec<NavItem> {
    vec![
        NavItem::new("About", "about"),
        NavItem::new("Tech Stack", "tech-vault"),
        NavItem::new("Projects", "projects"),
        NavItem::new("Experience", "experience"),
        NavItem::new("Contact", "contact"),
    ]
}

pub fn default_phrases() -> Vec<String> {
    [
        "AI products that ship",
        "RAG systems with real retrieval",
        "distributed platforms at scale",
        "financial intelligence tools",
        "secure ML pipelines",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pin(label: &str, lat: f64, lon: f64, color: &str, level: SkillLevel, blurb: &str) -> SkillPin {
    SkillPin {
        label: label.to_string(),
        lat,
        lon,
        color: Some(color.to_string()),
        level,
        blurb: blurb.to_string(),
    }
}

fn project(name: &str, blurb: &str, live: Option<&str>, repo: &str, tech: &[&str]) -> Project {
    Project {
        name: name.to_string(),
        blurb: blurb.to_string(),
        live: live.map(String::from),
        repo: repo.to_string(),
        tech: strings(tech),
    }
}

fn experience(role: &str, company: &str, dates: &str, tech: &[&str], details: &[&str]) -> Experience {
    Experience {
        role: role.to_string(),
        company: company.to_string(),
        dates: dates.to_string(),
        tech: strings(tech),
        details: strings(details),
    }
}

pub(super) fn default_content() -> SiteContent {
    use SkillLevel::*;

    SiteContent {
        name: "Ansh Bhanushali".to_string(),
        tagline: "Precision. Depth. Engineering".to_string(),
        tech_rows: vec![
            strings(&[
                "Next.js", "React", "TypeScript", "FastAPI", "Python", "Docker", "Kubernetes",
                "Azure", "PostgreSQL", "MongoDB",
            ]),
            strings(&[
                "RAG", "Agents", "LangChain", "LlamaIndex", "Vector DBs", "Eval", "Observability",
                "CI/CD", "Redis", "Kafka",
            ]),
            strings(&[
                "PyTorch", "Transformers", "OpenAI API", "Prompting", "A/B Testing", "Security",
                "Rate Limiting", "Monitoring", "MLOps", "ETL",
            ]),
        ],
        pins: vec![
            pin("Next.js", 62.0, -20.0, "#e5e7eb", Strong, "Production UI with App Router, SSR, and performance-first patterns."),
            pin("TypeScript", 58.0, 40.0, "#60a5fa", Strong, "Typed APIs, component systems, and clean contracts across frontend/backends."),
            pin("React", 62.0, 100.0, "#67e8f9", Strong, "Reusable UI, motion, and state patterns for product-grade experiences."),
            pin("FastAPI", 52.0, 160.0, "#5eead4", Strong, "High-throughput endpoints, background jobs, and clean service boundaries."),
            pin("Python", 58.0, 220.0, "#93c5fd", Expert, "ML pipelines, automation, signal processing work, and backend services."),
            pin("Docker", 8.0, -30.0, "#22d3ee", Strong, "Containerized services, reproducible builds, and dev/prod parity."),
            pin("Kubernetes", 0.0, 40.0, "#60a5fa", Working, "Hands-on with AKS workflows, deployments, and scaling fundamentals."),
            pin("Azure", 10.0, 110.0, "#38bdf8", Strong, "GenAI workflows and cloud deployment experience (AKS + supporting services)."),
            pin("PostgreSQL", 0.0, 180.0, "#a78bfa", Strong, "Schema design, queries, and reliability-minded data modeling."),
            pin("Redis", -8.0, 250.0, "#fb7185", Working, "Caching, rate-limits/queues basics, and performance-oriented patterns."),
            pin("RAG", -52.0, -10.0, "#f472b6", Strong, "Retrieval and grounding, chunking strategy, and evaluation mindset."),
            pin("Agents", -58.0, 60.0, "#c084fc", Working, "Tool-using flows, routing, and guardrails for reliable automation."),
            pin("Vector DBs", -52.0, 130.0, "#67e8f9", Working, "Semantic search basics, embeddings, and retrieval tuning patterns."),
            pin("Observability", -58.0, 200.0, "#34d399", Working, "Logs/metrics mindset, alerting basics, and debugging workflows."),
            pin("CI/CD", -52.0, 270.0, "#e5e7eb", Working, "Build/test pipelines and shipping with smaller, safer increments."),
        ],
        projects: vec![
            project(
                "Cognify",
                "Human-in-the-loop labeling with multimodal embeddings, vector search and confidence-based workflows.",
                None,
                "https://github.com/AnshBhanushali/Cognify",
                &["React", "TypeScript", "FastAPI", "Python"],
            ),
            project(
                "MarketScope",
                "Real-time market intelligence with a multi-agent architecture and executive summaries.",
                Some("https://marketscope.vercel.app"),
                "https://github.com/AnshBhanushali/MarketScope",
                &["Next.js", "TypeScript", "Python", "Docker"],
            ),
            project(
                "DocuQuest",
                "RAG document Q&A with uploads, chunking, vector indexing and citation-aware answers.",
                Some("https://docuquest-sigma.vercel.app"),
                "https://github.com/AnshBhanushali/DocuQuest",
                &["Next.js", "Python", "FastAPI", "PostgreSQL"],
            ),
            project(
                "Genesis AI Assistant",
                "AI helper built on LangChain RAG flows with a FastAPI backend.",
                Some("https://genesisaiassistant.vercel.app"),
                "https://github.com/AnshBhanushali/Genesis-AI-Assistant",
                &["Next.js", "TypeScript", "Python", "Docker"],
            ),
            project(
                "Decentralized Digital Wallet",
                "Ethereum light-wallet for ERC-20 tokens: send, receive, balances and contract calls.",
                None,
                "https://github.com/AnshBhanushali/Decentralized-Digital-Wallet",
                &["React", "Solidity", "TypeScript", "Docker"],
            ),
            project(
                "Chat Application + AI",
                "Real-time WebSocket chat with GPT integration.",
                None,
                "https://github.com/AnshBhanushali/ChatApplicationAI",
                &["Next.js", "TypeScript", "Python"],
            ),
        ],
        experience: vec![
            experience(
                "Software Engineer Intern, Generative AI & Cloud",
                "Siemens Digital Industries",
                "Summer 2024",
                &["Azure", "AKS", "Python", "LLMs", "Docker"],
                &[
                    "Built and deployed GenAI workflows on Azure, packaged as containers and shipped through a production pipeline.",
                    "Integrated model and data processing stages into scalable services on AKS.",
                    "Operationalized ML outputs into dashboards, metrics and iteration loops.",
                ],
            ),
            experience(
                "Research Assistant, Voice AI / Signal Processing",
                "University of Cincinnati (TruVox / Dr. Vesna Novak Lab)",
                "2024 - Present",
                &["Python", "TensorFlow", "PostgreSQL", "Docker", "Next.js"],
                &[
                    "Implemented end-to-end pipelines for speech research combining signal processing and ML.",
                    "Built interfaces and visualizations for research iteration.",
                    "Translated researcher requirements into testable prototypes.",
                ],
            ),
            experience(
                "Research Assistant, DVT Ultrasound AI (BUCL Lab)",
                "University of Cincinnati (BUCL Lab)",
                "2025 - Present",
                &["Python", "Deep Learning", "Docker", "Data Pipelines"],
                &[
                    "Supported an AI-assisted ultrasound workflow for deep vein thrombosis detection.",
                    "Maintained data prep and evaluation utilities for comparable model iteration.",
                    "Turned lab objectives into measurable experiments.",
                ],
            ),
            experience(
                "Software Developer, ML & AI",
                "CEAS Innovation Lab",
                "Aug 2023 - Dec 2023",
                &["Next.js", "Python", "PostgreSQL", "Docker"],
                &[
                    "Designed and shipped internal web tooling with stable data flows.",
                    "Reduced response times via indexing, caching and pipeline tuning.",
                    "Established reproducible dev environments and deployment workflows.",
                ],
            ),
        ],
        contacts: vec![
            ContactLink {
                label: "LinkedIn".to_string(),
                href: "https://www.linkedin.com/in/anshbhanushali".to_string(),
            },
            ContactLink {
                label: "GitHub".to_string(),
                href: "https://github.com/AnshBhanushali".to_string(),
            },
            ContactLink {
                label: "Resume".to_string(),
                href: "/Ansh_Bhanushali_Resume.pdf".to_string(),
            },
        ],
    }
}
