//! CSV file storage connection.

use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::storage::traits::Connection;

const MEMBERS_FILE: &str = "members.csv";
const PAYMENTS_FILE: &str = "payments.csv";

const MEMBERS_HEADER: &str =
    "member_id,name,age,gender,mobile,address,plan,start_date,end_date,amount,is_active,created_at\n";
const PAYMENTS_HEADER: &str =
    "id,member_id,name,plan,duration,amount,payment_date,start_date,end_date,status,created_at\n";

/// Manages the data directory and hands out file paths to the repositories.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<Mutex<PathBuf>>,
}

impl CsvConnection {
    /// Open (and create if missing) a data directory.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }
        Ok(Self {
            base_directory: Arc::new(Mutex::new(base_path)),
        })
    }

    /// Open the default data directory under the user's home.
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;
        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Gym Tracker");
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn members_file_path(&self) -> PathBuf {
        self.base_directory().join(MEMBERS_FILE)
    }

    pub fn payments_file_path(&self) -> PathBuf {
        self.base_directory().join(PAYMENTS_FILE)
    }

    /// Create the members file with its header row if it does not exist yet.
    pub fn ensure_members_file_exists(&self) -> Result<()> {
        let path = self.members_file_path();
        if !path.exists() {
            fs::write(&path, MEMBERS_HEADER)?;
        }
        Ok(())
    }

    /// Create the payments file with its header row if it does not exist yet.
    pub fn ensure_payments_file_exists(&self) -> Result<()> {
        let path = self.payments_file_path();
        if !path.exists() {
            fs::write(&path, PAYMENTS_HEADER)?;
        }
        Ok(())
    }
}

impl Connection for CsvConnection {
    type MemberRepository = super::member_repository::MemberRepository;
    type PaymentRepository = super::payment_repository::PaymentRepository;

    fn create_member_repository(&self) -> Self::MemberRepository {
        super::member_repository::MemberRepository::new(self.clone())
    }

    fn create_payment_repository(&self) -> Self::PaymentRepository {
        super::payment_repository::PaymentRepository::new(self.clone())
    }
}
