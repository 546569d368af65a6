use crate::{matches_query, TabFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AiToolCategory {
    Recruitment,
    Performance,
    Analytics,
    Documents,
    Assistant,
}

impl AiToolCategory {
    pub const ALL: &'static [AiToolCategory] = &[
        AiToolCategory::Recruitment,
        AiToolCategory::Performance,
        AiToolCategory::Analytics,
        AiToolCategory::Documents,
        AiToolCategory::Assistant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AiToolCategory::Recruitment => "Recruitment",
            AiToolCategory::Performance => "Performance",
            AiToolCategory::Analytics => "Analytics",
            AiToolCategory::Documents => "Documents",
            AiToolCategory::Assistant => "Assistant",
        }
    }
}

/// An entry in the built-in AI tools catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTool {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AiToolCategory,
    /// Route of the section the tool works on.
    pub route_hint: &'static str,
}

pub const AI_TOOLS: &[AiTool] = &[
    AiTool {
        id: "resume-screener",
        name: "Resume Screener",
        description: "Rank applicants against a job description and highlight missing skills.",
        category: AiToolCategory::Recruitment,
        route_hint: "/employees",
    },
    AiTool {
        id: "job-description-writer",
        name: "Job Description Writer",
        description: "Draft an inclusive job description from a title and a few bullet points.",
        category: AiToolCategory::Recruitment,
        route_hint: "/employees",
    },
    AiTool {
        id: "review-summarizer",
        name: "Review Summarizer",
        description: "Condense performance review notes into strengths and growth areas.",
        category: AiToolCategory::Performance,
        route_hint: "/employees",
    },
    AiTool {
        id: "goal-coach",
        name: "Goal Coach",
        description: "Turn vague objectives into measurable quarterly goals.",
        category: AiToolCategory::Performance,
        route_hint: "/training",
    },
    AiTool {
        id: "attrition-insights",
        name: "Attrition Insights",
        description: "Spot departments with rising leave and absence patterns.",
        category: AiToolCategory::Analytics,
        route_hint: "/reports",
    },
    AiTool {
        id: "payroll-anomaly-check",
        name: "Payroll Anomaly Check",
        description: "Flag payroll records whose deductions deviate from the usual range.",
        category: AiToolCategory::Analytics,
        route_hint: "/payroll",
    },
    AiTool {
        id: "policy-drafter",
        name: "Policy Drafter",
        description: "Produce a first draft of an HR policy from a short brief.",
        category: AiToolCategory::Documents,
        route_hint: "/documents",
    },
    AiTool {
        id: "hr-assistant",
        name: "HR Assistant",
        description: "Answer common questions about leave, expenses and benefits.",
        category: AiToolCategory::Assistant,
        route_hint: "/dashboard",
    },
];

/// Catalog entries matching the search box and category tab.
pub fn filter_tools(query: &str, tab: TabFilter<AiToolCategory>) -> Vec<&'static AiTool> {
    AI_TOOLS
        .iter()
        .filter(|tool| tab.admits(&tool.category))
        .filter(|tool| matches_query(&[tool.name, tool.description], query))
        .collect()
}
