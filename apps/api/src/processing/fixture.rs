//! The fabricated document the simulator writes in place of real parsing.

use crate::session::models::{
    Certification, Education, ParsedResume, PersonalInfo, Project, SkillGroup, WorkExperience,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn sample_resume() -> ParsedResume {
    ParsedResume {
        personal_info: PersonalInfo {
            name: "Sarah Johnson".to_string(),
            title: "Digital Marketing Manager".to_string(),
            email: "sarah.johnson@email.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            location: "San Francisco, CA".to_string(),
            linkedin: "linkedin.com/in/sarahjohnson".to_string(),
            website: "sarahjohnson.dev".to_string(),
            summary: "Experienced digital marketing professional with 5+ years of expertise in \
                      developing and executing data-driven marketing strategies. Proven track \
                      record of increasing brand awareness, driving customer acquisition, and \
                      optimizing conversion rates across multiple channels."
                .to_string(),
        },
        work_experience: vec![
            WorkExperience {
                company: "TechCorp Inc.".to_string(),
                position: "Senior Marketing Manager".to_string(),
                duration: "2021 - Present".to_string(),
                location: "San Francisco, CA".to_string(),
                description: "Led digital marketing campaigns resulting in 40% increase in \
                              qualified leads. Managed cross-functional team of 5 marketing \
                              professionals and $2M annual marketing budget. Implemented \
                              marketing automation workflows that improved lead nurturing by 60%."
                    .to_string(),
                achievements: strings(&[
                    "Increased organic traffic by 150% through SEO optimization",
                    "Launched successful product campaigns with 25% higher ROI",
                    "Reduced customer acquisition cost by 30%",
                ]),
            },
            WorkExperience {
                company: "StartupXYZ".to_string(),
                position: "Digital Marketing Specialist".to_string(),
                duration: "2019 - 2021".to_string(),
                location: "San Francisco, CA".to_string(),
                description: "Developed and executed comprehensive digital marketing strategies \
                              for B2B SaaS products. Managed social media presence across 5 \
                              platforms and grew follower base by 300%."
                    .to_string(),
                achievements: strings(&[
                    "Created content marketing strategy that generated 200+ MQLs monthly",
                    "Optimized PPC campaigns with 45% improvement in conversion rates",
                    "Built email marketing sequences with 35% open rates",
                ]),
            },
            WorkExperience {
                company: "Marketing Agency Pro".to_string(),
                position: "Marketing Coordinator".to_string(),
                duration: "2018 - 2019".to_string(),
                location: "San Francisco, CA".to_string(),
                description: "Supported marketing campaigns for 15+ clients across various \
                              industries. Assisted in campaign planning, execution, and \
                              performance analysis."
                    .to_string(),
                achievements: strings(&[
                    "Managed client relationships and maintained 95% retention rate",
                    "Created marketing materials that increased brand engagement by 25%",
                ]),
            },
        ],
        education: vec![Education {
            institution: "University of California, Berkeley".to_string(),
            degree: "Bachelor of Arts in Marketing".to_string(),
            year: "2018".to_string(),
            gpa: Some("3.8".to_string()),
            relevant: Some(
                "Relevant Coursework: Digital Marketing, Consumer Behavior, Marketing \
                 Analytics, Brand Management"
                    .to_string(),
            ),
        }],
        skills: vec![
            SkillGroup {
                category: "Digital Marketing".to_string(),
                items: strings(&["SEO/SEM", "Google Analytics", "Google Ads", "Facebook Ads", "Content Marketing"]),
            },
            SkillGroup {
                category: "Marketing Automation".to_string(),
                items: strings(&["HubSpot", "Mailchimp", "Marketo", "Pardot", "ActiveCampaign"]),
            },
            SkillGroup {
                category: "Analytics & Tools".to_string(),
                items: strings(&["Google Analytics", "Tableau", "Salesforce", "WordPress", "Canva"]),
            },
            SkillGroup {
                category: "Technical Skills".to_string(),
                items: strings(&["HTML/CSS", "JavaScript Basics", "SQL", "A/B Testing", "CRO"]),
            },
        ],
        certifications: vec![
            Certification {
                name: "Google Analytics Certified".to_string(),
                issuer: "Google".to_string(),
                year: "2023".to_string(),
                id: Some("GA-12345".to_string()),
            },
            Certification {
                name: "HubSpot Content Marketing Certified".to_string(),
                issuer: "HubSpot".to_string(),
                year: "2023".to_string(),
                id: Some("HUB-67890".to_string()),
            },
            Certification {
                name: "Facebook Blueprint Certified".to_string(),
                issuer: "Facebook".to_string(),
                year: "2022".to_string(),
                id: Some("FB-54321".to_string()),
            },
        ],
        projects: vec![
            Project {
                name: "E-commerce Growth Campaign".to_string(),
                description: "Led comprehensive digital marketing campaign for fashion \
                              e-commerce client"
                    .to_string(),
                results: "300% increase in online sales, 150% improvement in ROAS".to_string(),
                technologies: strings(&["Google Ads", "Facebook Ads", "Google Analytics", "Shopify"]),
            },
            Project {
                name: "B2B SaaS Lead Generation".to_string(),
                description: "Developed multi-channel lead generation strategy for SaaS startup"
                    .to_string(),
                results: "Generated 500+ qualified leads in 6 months, 40% conversion rate"
                    .to_string(),
                technologies: strings(&["HubSpot", "LinkedIn Ads", "Content Marketing", "Email Automation"]),
            },
        ],
    }
}
