//! Word lists the generators draw from.

pub const REGION_NAMES: &[&str] = &[
    "North America",
    "Latin America",
    "Western Europe",
    "Northern Europe",
    "Eastern Europe",
    "Middle East",
    "North Africa",
    "Sub-Saharan Africa",
    "South Asia",
    "Southeast Asia",
    "East Asia",
    "Oceania",
];

pub const FOCUS_AREAS: &[&str] = &[
    "Renewable Energy",
    "Digital Transformation",
    "Water Management",
    "Smart Infrastructure",
    "Healthcare Systems",
    "Supply Chain",
    "Advanced Manufacturing",
    "Urban Mobility",
    "Agritech",
    "Cybersecurity",
];

pub const COMPANY_PREFIXES: &[&str] = &[
    "Apex", "Blue", "Cedar", "Delta", "Ember", "Falcon", "Granite", "Harbor", "Iron", "Juniper",
    "Keystone", "Lumen", "Meridian", "Nova", "Orbit", "Pioneer", "Quartz", "Redwood", "Summit",
    "Titan", "Vertex", "Willow",
];

pub const COMPANY_SUFFIXES: &[&str] = &[
    "Dynamics",
    "Industries",
    "Solutions",
    "Systems",
    "Partners",
    "Holdings",
    "Labs",
    "Works",
    "Group",
    "Technologies",
    "Logistics",
    "Energy",
];

pub const INDUSTRIES: &[&str] = &[
    "Construction",
    "Energy",
    "Manufacturing",
    "Healthcare",
    "Logistics",
    "Software",
    "Telecommunications",
    "Retail",
    "Finance",
    "Agriculture",
];

pub const FIRST_NAMES: &[&str] = &[
    "Amara", "Ben", "Carla", "Dmitri", "Elena", "Farid", "Grace", "Hiro", "Ines", "Jonas",
    "Kemi", "Liam", "Maya", "Noah", "Olga", "Priya", "Quinn", "Rafael", "Sara", "Tomas",
    "Uma", "Victor", "Wen", "Yusuf", "Zoe",
];

pub const LAST_NAMES: &[&str] = &[
    "Adeyemi", "Bauer", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Haddad", "Ito",
    "Jensen", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Petrov", "Rossi",
    "Schmidt", "Tanaka", "Usman", "Varga", "Wright", "Yilmaz", "Zhang",
];

pub const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Operations",
    "Finance",
    "Human Resources",
    "Sales",
    "Procurement",
    "Maintenance",
    "IT",
];

pub const ROLES: &[&str] = &[
    "Project Manager",
    "Engineer",
    "Analyst",
    "Technician",
    "Coordinator",
    "Specialist",
    "Team Lead",
    "Director",
    "Consultant",
];

pub const PROJECT_ADJECTIVES: &[&str] = &[
    "Coastal", "Northern", "Integrated", "Modular", "Resilient", "Smart", "Green", "Unified",
    "Rapid", "Strategic",
];

pub const PROJECT_NOUNS: &[&str] = &[
    "Grid Upgrade",
    "Plant Expansion",
    "ERP Rollout",
    "Pipeline Retrofit",
    "Data Platform",
    "Depot Modernization",
    "Network Refresh",
    "Facility Build",
    "Fleet Electrification",
    "Compliance Program",
];

pub const MILESTONE_PHASES: &[&str] = &[
    "Discovery",
    "Requirements",
    "Design",
    "Procurement",
    "Implementation",
    "Testing",
    "Rollout",
    "Handover",
];

pub const TASK_VERBS: &[&str] = &[
    "Draft", "Review", "Prepare", "Validate", "Install", "Configure", "Document", "Audit",
    "Schedule", "Coordinate",
];

pub const TASK_OBJECTS: &[&str] = &[
    "site survey",
    "budget estimate",
    "vendor contract",
    "safety plan",
    "test cases",
    "stakeholder briefing",
    "equipment list",
    "permit application",
    "training material",
    "status report",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Labor",
    "Materials",
    "Equipment Rental",
    "Travel",
    "Subcontractors",
    "Licenses",
];

pub const CHAT_TOPICS: &[&str] = &[
    "General",
    "Site Coordination",
    "Procurement",
    "Design Review",
    "Standup",
    "Safety",
    "Leadership",
    "Random",
];

pub const CHAT_LINES: &[&str] = &[
    "Morning all, quick sync at 10?",
    "Uploaded the latest drawings to the shared folder.",
    "Vendor confirmed delivery for Thursday.",
    "Can someone review the updated budget sheet?",
    "Site inspection went well, minor punch list items only.",
    "Reminder: timesheets are due Friday.",
    "I'll take the follow-up with the client.",
    "Blocked on the permit, escalating today.",
    "Great work on the handover yesterday!",
    "Pushing the review to next week, conflicts on my side.",
];

pub const KANBAN_COLUMNS: &[&str] = &["Backlog", "To Do", "In Progress", "Review", "Done"];

pub const KB_CATEGORIES: &[&str] = &[
    "Onboarding",
    "Policies",
    "Safety Procedures",
    "IT Support",
    "Project Delivery",
    "Finance How-To",
    "Equipment Manuals",
];

pub const KB_TOPICS: &[&str] = &[
    "Getting started",
    "Frequently asked questions",
    "Step-by-step checklist",
    "Troubleshooting guide",
    "Best practices",
    "Escalation paths",
    "Templates and forms",
];

pub const LEAVE_TYPES: &[&str] = &["Annual", "Sick", "Parental", "Unpaid", "Study"];

pub const BENEFIT_TYPES: &[(&str, &str)] = &[
    ("Health Insurance", "Medica Plus"),
    ("Dental", "BrightSmile"),
    ("Vision", "ClearView"),
    ("Pension", "Northstar Pensions"),
    ("Life Insurance", "Guardian Life"),
    ("Gym Membership", "FitNation"),
];

pub const DOCUMENT_TYPES: &[&str] = &[
    "Contract",
    "ID Copy",
    "Certification",
    "Tax Form",
    "NDA",
    "Training Record",
];

pub const SUPPLIER_NAMES: &[&str] = &[
    "Allied Components",
    "Benchmark Supply",
    "Continental Parts",
    "Dependable Distributors",
    "Eastline Industrial",
    "Frontier Materials",
    "Global Fasteners",
    "Highway Electrical",
];

pub const ITEM_CATALOG: &[(&str, &str)] = &[
    ("Hydraulic Pump", "Mechanical"),
    ("Circuit Breaker", "Electrical"),
    ("Safety Helmet", "PPE"),
    ("Steel Bolt M12", "Fasteners"),
    ("Copper Cable 50m", "Electrical"),
    ("Air Filter", "Consumables"),
    ("Bearing 6205", "Mechanical"),
    ("Work Gloves", "PPE"),
    ("Lubricant 5L", "Consumables"),
    ("LED Floodlight", "Electrical"),
];

pub const EQUIPMENT_TYPES: &[&str] = &[
    "Generator",
    "Compressor",
    "Forklift",
    "HVAC Unit",
    "Conveyor",
    "Pump Station",
    "Crane",
    "Transformer",
];

pub const WORK_ORDER_TITLES: &[&str] = &[
    "Preventive maintenance",
    "Replace worn belt",
    "Inspect electrical panel",
    "Calibrate sensors",
    "Lubricate moving parts",
    "Repair hydraulic leak",
    "Firmware update",
    "Annual safety inspection",
];

pub const CRM_POSITIONS: &[&str] = &[
    "CEO",
    "CTO",
    "Procurement Manager",
    "Operations Director",
    "Facilities Manager",
    "Head of Engineering",
];

pub const DEAL_TITLES: &[&str] = &[
    "Maintenance Contract",
    "Equipment Supply",
    "Consulting Engagement",
    "Software Licenses",
    "Installation Services",
    "Framework Agreement",
];

pub const COMMUNICATION_CHANNELS: &[&str] = &["email", "phone", "meeting", "video call"];

pub const COMMUNICATION_SUMMARIES: &[&str] = &[
    "Introductory call, interested in a follow-up demo.",
    "Sent revised proposal with updated pricing.",
    "Discussed delivery timeline and scope changes.",
    "Requested references from similar projects.",
    "Negotiated payment terms.",
    "Checked in after installation, positive feedback.",
];
