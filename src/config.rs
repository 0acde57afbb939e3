use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub connection_string: Option<String>,
    pub max_connections: Option<u32>,
}

/// Volumes and knobs for a seed run. Fields named `max_*` are upper bounds
/// of a random per-parent count; the others are exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub batch_size: usize,
    /// Fixed RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
    /// Row cap when a step is loaded from the store instead of seeded.
    pub load_limit: usize,

    pub regions: usize,
    pub max_focus_centers_per_region: usize,
    pub companies: usize,
    pub personnel: usize,
    pub max_users: usize,

    pub projects: usize,
    pub max_milestones_per_project: usize,
    pub max_tasks_per_milestone: usize,
    pub forecast_periods_per_project: usize,
    pub max_expenses_per_project: usize,

    pub chat_groups: usize,
    pub max_messages_per_group: usize,
    pub max_kanban_tasks_per_column: usize,
    pub kb_categories: usize,
    pub max_articles_per_category: usize,

    pub max_leave_requests: usize,
    pub payroll_months: usize,
    pub max_benefits: usize,
    pub max_hr_documents: usize,

    pub suppliers: usize,
    pub inventory_items: usize,
    pub max_orders_per_item: usize,

    pub equipment: usize,
    pub max_work_orders: usize,

    pub crm_companies: usize,
    pub max_contacts_per_company: usize,
    pub max_deals_per_company: usize,
    pub max_logs_per_contact: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            max_connections: Some(10),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            batch_size: crate::seed::DEFAULT_BATCH_SIZE,
            rng_seed: None,
            load_limit: 1_000,

            regions: 5,
            max_focus_centers_per_region: 3,
            companies: 10,
            personnel: 30,
            max_users: 100,

            projects: 20,
            max_milestones_per_project: 5,
            max_tasks_per_milestone: 6,
            forecast_periods_per_project: 4,
            max_expenses_per_project: 8,

            chat_groups: 8,
            max_messages_per_group: 25,
            max_kanban_tasks_per_column: 4,
            kb_categories: 5,
            max_articles_per_category: 4,

            max_leave_requests: 3,
            payroll_months: 3,
            max_benefits: 3,
            max_hr_documents: 2,

            suppliers: 6,
            inventory_items: 25,
            max_orders_per_item: 3,

            equipment: 15,
            max_work_orders: 3,

            crm_companies: 10,
            max_contacts_per_company: 4,
            max_deals_per_company: 3,
            max_logs_per_contact: 3,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config` file and
    /// `BIZOPS_*` environment variables (`__` separates nested keys).
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        config = config.add_source(config::File::with_name("config").required(false));

        config = config.add_source(
            config::Environment::with_prefix("BIZOPS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Database URL from config, else `DATABASE_URL`.
    pub fn database_url(&self) -> anyhow::Result<String> {
        if let Some(connection_string) = &self.database.connection_string {
            return Ok(connection_string.clone());
        }

        std::env::var("DATABASE_URL").map_err(|_| {
            anyhow::anyhow!(
                "no database configured: set BIZOPS_DATABASE__CONNECTION_STRING or DATABASE_URL"
            )
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
