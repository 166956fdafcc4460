//! Fixed catalogs offered by the wizard: plans, templates and color schemes.

use serde::Serialize;

use crate::session::{PlanId, TemplateId};

#[derive(Debug, Clone, Serialize)]
pub struct PlanInfo {
    pub id: PlanId,
    pub name: &'static str,
    pub price: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorScheme {
    pub id: &'static str,
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
    pub color_schemes: &'static [ColorScheme],
}

pub const PLANS: &[PlanInfo] = &[
    PlanInfo {
        id: PlanId::Basic,
        name: "Basic",
        price: "Free",
        description: "Perfect for getting started",
        features: &[
            "Create 1 website",
            "Basic templates",
            "PDF resume upload",
            "Standard customization",
            "Basic analytics",
        ],
        popular: false,
    },
    PlanInfo {
        id: PlanId::Pro,
        name: "Pro",
        price: "$9/month",
        description: "Best for professionals",
        features: &[
            "Create unlimited websites",
            "Premium templates",
            "PDF & DOCX support",
            "Advanced customization",
            "Priority support",
            "Custom domain",
            "Advanced analytics",
            "SEO optimization",
        ],
        popular: true,
    },
    PlanInfo {
        id: PlanId::Enterprise,
        name: "Enterprise",
        price: "$29/month",
        description: "For teams and businesses",
        features: &[
            "Everything in Pro",
            "Team collaboration",
            "White-label branding",
            "API access",
            "Dedicated support",
            "Custom integrations",
            "Advanced security",
            "Priority processing",
        ],
        popular: false,
    },
];

pub const TEMPLATES: &[TemplateInfo] = &[
    TemplateInfo {
        id: TemplateId::ProfessionalExecutive,
        name: "Professional Executive",
        description: "Clean corporate design perfect for executives and business professionals",
        category: "Business",
        features: &[
            "Sidebar navigation with profile photo",
            "Timeline layout for experience",
            "Skills displayed as progress bars",
            "Download resume button",
            "Contact information sidebar",
            "Professional color scheme",
        ],
        popular: true,
        color_schemes: &[
            ColorScheme { id: "default", name: "Corporate Blue", primary: "#1e3a8a", secondary: "#3b82f6" },
            ColorScheme { id: "elegant", name: "Elegant Navy", primary: "#1e1b4b", secondary: "#6366f1" },
            ColorScheme { id: "modern", name: "Modern Teal", primary: "#134e4a", secondary: "#14b8a6" },
        ],
    },
    TemplateInfo {
        id: TemplateId::CreativePortfolio,
        name: "Creative Portfolio",
        description: "Colorful, artistic design that showcases creativity and personality",
        category: "Creative",
        features: &[
            "Grid-based portfolio layout",
            "Creative typography and animations",
            "Image galleries for projects",
            "Social media integration",
            "Animated hover effects",
            "Gradient color scheme",
        ],
        popular: false,
        color_schemes: &[
            ColorScheme { id: "default", name: "Creative Purple", primary: "#7c3aed", secondary: "#ec4899" },
            ColorScheme { id: "vibrant", name: "Vibrant Orange", primary: "#ea580c", secondary: "#f59e0b" },
            ColorScheme { id: "artistic", name: "Artistic Green", primary: "#16a34a", secondary: "#84cc16" },
        ],
    },
    TemplateInfo {
        id: TemplateId::MinimalModern,
        name: "Minimal Modern",
        description: "Ultra-clean design focusing on typography and white space",
        category: "Minimal",
        features: &[
            "Typography-focused layout",
            "Card-based information display",
            "Geometric shapes and spacing",
            "Professional photography areas",
            "Subtle shadows and clean lines",
            "Minimalist aesthetic",
        ],
        popular: true,
        color_schemes: &[
            ColorScheme { id: "default", name: "Golden Elegance", primary: "#f59e0b", secondary: "#fbbf24" },
            ColorScheme { id: "monochrome", name: "Pure Monochrome", primary: "#374151", secondary: "#6b7280" },
            ColorScheme { id: "rose", name: "Rose Gold", primary: "#e11d48", secondary: "#f43f5e" },
        ],
    },
];

pub fn plan(id: PlanId) -> &'static PlanInfo {
    // PLANS lists every PlanId variant.
    PLANS.iter().find(|p| p.id == id).unwrap_or(&PLANS[0])
}

pub fn template(id: TemplateId) -> &'static TemplateInfo {
    // TEMPLATES lists every TemplateId variant.
    TEMPLATES.iter().find(|t| t.id == id).unwrap_or(&TEMPLATES[0])
}

pub fn color_scheme(template_id: TemplateId, scheme_id: &str) -> Option<&'static ColorScheme> {
    template(template_id)
        .color_schemes
        .iter()
        .find(|s| s.id == scheme_id)
}
