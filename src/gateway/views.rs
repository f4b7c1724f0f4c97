use minijinja::Environment;
use serde::Serialize;

use crate::models::{MessageView, SystemStatus};

/// Viewer count shown on the admin page. No real signal backs it.
pub const PLACEHOLDER_VIEWER_COUNT: u32 = 124;

pub const BACKEND_UNAVAILABLE: &str = "Backend Service Unavailable";

/// View model for `index.html`.
#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub system: SystemStatus,
    pub success: bool,
    pub error: Option<&'static str>,
}

impl IndexPage {
    pub fn with_status(system: SystemStatus) -> Self {
        IndexPage {
            system,
            success: false,
            error: None,
        }
    }

    pub fn submitted() -> Self {
        IndexPage {
            system: SystemStatus::assumed_online(),
            success: true,
            error: None,
        }
    }

    pub fn backend_unavailable() -> Self {
        IndexPage {
            system: SystemStatus::degraded(),
            success: false,
            error: Some(BACKEND_UNAVAILABLE),
        }
    }
}

/// View model for `admin.html`.
#[derive(Debug, Serialize)]
pub struct AdminPage {
    pub messages: Vec<MessageView>,
    pub viewer_count: u32,
}

impl AdminPage {
    pub fn new(messages: Vec<MessageView>) -> Self {
        AdminPage {
            messages,
            viewer_count: PLACEHOLDER_VIEWER_COUNT,
        }
    }
}

/// Compiled page templates. Names ending in `.html` are auto-escaped.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", include_str!("../../templates/index.html"))?;
        env.add_template("admin.html", include_str!("../../templates/admin.html"))?;
        Ok(Views { env })
    }

    pub fn index(&self, page: &IndexPage) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(page)
    }

    pub fn admin(&self, page: &AdminPage) -> Result<String, minijinja::Error> {
        self.env.get_template("admin.html")?.render(page)
    }
}
