#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cashcast::config::ConfigManager;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const ACCOUNT_ID: &str = "0d9f4c1a-5b7e-4e62-8f3a-1a2b3c4d5e6f";
pub const RENT_ID: &str = "6f1b3f5e-2c4e-4a53-9a7e-2d0c7b0f6a10";
pub const COFFEE_ID: &str = "3c2a1b0d-9e8f-4a7b-8c6d-5e4f3a2b1c0d";
pub const SALARY_ID: &str = "9a8b7c6d-5e4f-4a3b-9c1d-0e9f8a7b6c5d";
pub const TODAY: &str = "2024-06-10";

/// Creates an isolated base directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn config_manager(home: &Path) -> ConfigManager {
    ConfigManager::with_base_dir(home.to_path_buf()).expect("create config manager for temp dir")
}

/// Checking account at 100.00 with a daily 10.00 coffee habit, monthly rent
/// on the 12th and a salary on the 11th. Rent on 2024-06-12 is skipped.
pub fn sample_snapshot() -> String {
    format!(
        r#"{{
  "accounts": [
    {{ "id": "{ACCOUNT_ID}", "name": "Checking", "current_balance": 100.0 }}
  ],
  "bills": [
    {{
      "id": "{COFFEE_ID}",
      "account_id": "{ACCOUNT_ID}",
      "name": "Coffee",
      "amount": 10.0,
      "start_date": "2024-06-10",
      "recurrence": "DAILY"
    }},
    {{
      "id": "{RENT_ID}",
      "account_id": "{ACCOUNT_ID}",
      "name": "Rent",
      "amount": 500.0,
      "start_date": "2024-05-12",
      "recurrence": "monthly"
    }}
  ],
  "transactions": [
    {{
      "id": "{SALARY_ID}",
      "account_id": "{ACCOUNT_ID}",
      "name": "Salary",
      "amount": 40.0,
      "date": "2024-06-11"
    }}
  ],
  "overrides": [
    {{
      "account_id": "{ACCOUNT_ID}",
      "event_type": "bill",
      "event_id": "{RENT_ID}",
      "event_date": "2024-06-12",
      "skip": true
    }}
  ]
}}"#
    )
}

pub fn write_snapshot(dir: &Path) -> PathBuf {
    let path = dir.join("snapshot.json");
    std::fs::write(&path, sample_snapshot()).expect("write snapshot");
    path
}
