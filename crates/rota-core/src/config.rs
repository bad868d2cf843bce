//! rota.toml configuration parser.
//!
//! Every section is optional. An empty file yields the pharmacy's own
//! roster and weekly table.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Role, StaffProfile};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotaConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_staff")]
    pub staff: Vec<StaffConfig>,
    #[serde(default)]
    pub blackout: BlackoutConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    /// `[schedule.<Role>]` tables of `<Day> = "H:MM-H:MM"` or an array.
    #[serde(default = "default_schedule")]
    pub schedule: BTreeMap<String, BTreeMap<String, RangeSpec>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Date the calendar opens on, written as a quoted `"YYYY-MM-DD"`.
    #[serde(default = "default_anchor_date")]
    pub anchor_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffConfig {
    pub name: String,
    pub role: Role,
    pub color: String,
    #[serde(flatten)]
    pub profile: StaffProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackoutConfig {
    pub roles: Vec<Role>,
    pub first_hour: u8,
    pub last_hour: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Role whose cells carry task labels.
    pub role: Role,
}

/// A day entry as written in the file: one range or a split shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeSpec {
    One(String),
    Many(Vec<String>),
}

impl RangeSpec {
    pub fn as_slice(&self) -> &[String] {
        match self {
            RangeSpec::One(r) => std::slice::from_ref(r),
            RangeSpec::Many(rs) => rs,
        }
    }
}

impl Default for RotaConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            staff: default_staff(),
            blackout: BlackoutConfig::default(),
            tasks: TasksConfig::default(),
            schedule: default_schedule(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            data_dir: default_data_dir(),
            anchor_date: default_anchor_date(),
        }
    }
}

impl Default for BlackoutConfig {
    fn default() -> Self {
        Self {
            roles: vec![Role::Pharmacist2, Role::Technician, Role::Assistant2],
            first_hour: 1,
            last_hour: 8,
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            role: Role::Pharmacist1,
        }
    }
}

impl RotaConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RotaConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Configured staff entry for a role, if any.
    pub fn staff_for(&self, role: Role) -> Option<&StaffConfig> {
        self.staff.iter().find(|s| s.role == role)
    }
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("/var/lib/rota")
}

fn default_anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 4).unwrap_or_default()
}

fn staff(name: &str, role: Role, color: &str) -> StaffConfig {
    StaffConfig {
        name: name.to_string(),
        role,
        color: color.to_string(),
        profile: StaffProfile::default(),
    }
}

fn default_staff() -> Vec<StaffConfig> {
    let mut p1 = staff("Pharmacist 1", Role::Pharmacist1, "bg-blue-100");
    p1.profile = StaffProfile {
        pronunciation: Some("Farm-a-sis-t won".to_string()),
        pronouns: None,
        phone: Some("905-867-5309".to_string()),
        email: Some("p1@medmehealth.com".to_string()),
    };
    vec![
        p1,
        staff("Pharmacist 2", Role::Pharmacist2, "bg-green-100"),
        staff("Technician 1", Role::Technician, "bg-orange-100"),
        staff("Assistant 1", Role::Assistant1, "bg-yellow-100"),
        staff("Assistant 2", Role::Assistant2, "bg-pink-100"),
    ]
}

fn default_schedule() -> BTreeMap<String, BTreeMap<String, RangeSpec>> {
    let split = || RangeSpec::Many(vec!["9:00-10:00".into(), "11:00-5:00".into()]);
    let one = |r: &str| RangeSpec::One(r.to_string());

    let rows: [(&str, Vec<(&str, RangeSpec)>); 5] = [
        (
            "Pharmacist1",
            vec![
                ("Monday", split()),
                ("Wednesday", split()),
                ("Thursday", split()),
                ("Friday", split()),
                ("Saturday", RangeSpec::Many(vec!["9:00-5:00".into()])),
            ],
        ),
        (
            "Pharmacist2",
            vec![
                ("Sunday", one("9:00-5:00")),
                ("Monday", one("2:00-5:00")),
                ("Wednesday", one("9:00-5:00")),
                ("Friday", one("9:00-5:00")),
            ],
        ),
        (
            "Technician",
            vec![
                ("Monday", one("9:00-5:00")),
                ("Tuesday", one("9:00-5:00")),
                ("Wednesday", one("1:00-5:00")),
                ("Thursday", one("9:00-5:00")),
                ("Friday", one("9:00-5:00")),
            ],
        ),
        ("Assistant1", vec![("Sunday", one("9:00-5:00"))]),
        (
            "Assistant2",
            vec![
                ("Monday", one("9:00-5:00")),
                ("Tuesday", one("9:00-5:00")),
                ("Thursday", one("1:00-5:00")),
                ("Saturday", one("9:00-5:00")),
            ],
        ),
    ];

    rows.into_iter()
        .map(|(role, days)| {
            let days = days
                .into_iter()
                .map(|(day, spec)| (day.to_string(), spec))
                .collect();
            (role.to_string(), days)
        })
        .collect()
}
