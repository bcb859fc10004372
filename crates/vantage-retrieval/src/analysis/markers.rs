//! Marker tables for the rule-based analyzer. English and Chinese forms sit
//! side by side; platform content is mixed-language.

use vantage_core::intent::Intent;

/// Intent markers, checked in declared order; first match wins.
pub const INTENT_MARKERS: &[(Intent, &[&str])] = &[
    (
        Intent::Factual,
        &[
            "what is", "what are", "who is", "who founded", "when did", "when was", "where is",
            "define", "definition", "什么是", "是谁", "什么时候", "在哪",
        ],
    ),
    (
        Intent::Comparison,
        &[
            "compare", "comparison", "versus", "vs", "difference", "better than", "对比", "比较",
            "区别", "哪个更",
        ],
    ),
    (
        Intent::Trend,
        &[
            "trend", "outlook", "future", "forecast", "emerging", "趋势", "未来", "前景", "发展方向",
        ],
    ),
    (
        Intent::Relationship,
        &[
            "relationship", "related to", "connected", "partner", "invested in", "backed by",
            "founded by", "关系", "合作", "投资了", "关联",
        ],
    ),
    (
        Intent::Investment,
        &[
            "invest", "funding", "raise", "round", "series", "valuation", "venture", "vc", "投资",
            "融资", "估值", "轮",
        ],
    ),
];

/// Capitalized words that open a question rather than name something.
pub const NON_ENTITY_WORDS: &[&str] = &[
    "what", "who", "when", "where", "why", "how", "which", "the", "a", "an", "is", "are", "was",
    "were", "did", "does", "do", "can", "could", "should", "will", "would", "tell", "show", "list",
    "give", "compare", "explain", "in", "on", "of", "for", "and", "or", "its", "it", "please", "i",
];

/// Domain words that count as entities on their own.
pub const DOMAIN_ENTITY_WORDS: &[&str] = &["ai", "company", "investment", "startup", "funding"];

/// Chinese domain terms that count as entities on their own.
pub const DOMAIN_ENTITY_TERMS_ZH: &[&str] = &["公司", "投资", "智能", "创投"];

pub const ANALYTICAL_MARKERS: &[&str] = &[
    "analyze", "analyse", "analysis", "compare", "why", "how", "evaluate", "assess", "分析", "对比",
    "评价", "如何", "为什么",
];

/// The specificity checklist: one entry per domain concept.
pub const SPECIFICITY_CONCEPTS: &[(&str, &[&str])] = &[
    ("company", &["company", "companies", "startup", "公司", "企业"]),
    ("investment", &["invest", "funding", "投资", "融资"]),
    ("round", &["round", "series", "轮"]),
    ("valuation", &["valuation", "valued", "估值"]),
    ("founder", &["founder", "founded", "创始人"]),
    ("ceo", &["ceo", "首席执行官"]),
];

pub const TEMPORAL_MARKERS: &[&str] = &[
    "latest", "recent", "today", "this year", "last year", "future", "trend", "2024", "2025",
    "最新", "今年", "去年", "未来", "趋势",
];
