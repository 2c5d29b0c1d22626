//! CSV-backed member repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::domain::membership;
use crate::domain::models::Member;
use crate::storage::traits::MemberStorage;

#[derive(Clone)]
pub struct MemberRepository {
    connection: CsvConnection,
}

impl MemberRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every member record from the CSV file.
    ///
    /// Field parsing is fail-soft: a malformed optional field degrades to its
    /// empty value with a logged warning, and a row missing its id is skipped
    /// rather than aborting the whole read.
    fn read_members(&self) -> Result<Vec<Member>> {
        self.connection.ensure_members_file_exists()?;

        let file = File::open(self.connection.members_file_path())?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut members = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            let member_id = match record.get(0).unwrap_or("").parse::<u32>() {
                Ok(id) => id,
                Err(_) => {
                    warn!("Skipping member row with unparsable id: {:?}", record.get(0));
                    continue;
                }
            };
            let start_date = match membership::parse_date(record.get(7).unwrap_or("")) {
                Some(d) => d,
                None => {
                    warn!("Skipping member {} with unparsable start date", member_id);
                    continue;
                }
            };

            members.push(Member {
                member_id,
                name: record.get(1).unwrap_or("").to_string(),
                age: record.get(2).unwrap_or("0").parse().unwrap_or(0),
                gender: record.get(3).unwrap_or("").to_string(),
                mobile: record.get(4).unwrap_or("").to_string(),
                address: record.get(5).unwrap_or("").to_string(),
                plan: record.get(6).unwrap_or("").to_string(),
                start_date,
                // Empty or malformed end dates mean no coverage window.
                end_date: membership::parse_date(record.get(8).unwrap_or("")),
                amount: record.get(9).unwrap_or("0").parse().unwrap_or(0),
                is_active: match record.get(10).unwrap_or("") {
                    "active" => Some(true),
                    "inactive" => Some(false),
                    _ => None,
                },
                created_at: record
                    .get(11)
                    .unwrap_or("")
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_default(),
            });
        }
        Ok(members)
    }

    /// Write all member records back, atomically via a temp file.
    fn write_members(&self, members: &[Member]) -> Result<()> {
        let file_path = self.connection.members_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            csv_writer.write_record([
                "member_id", "name", "age", "gender", "mobile", "address", "plan",
                "start_date", "end_date", "amount", "is_active", "created_at",
            ])?;

            for member in members {
                csv_writer.write_record([
                    member.member_id.to_string().as_str(),
                    member.name.as_str(),
                    member.age.to_string().as_str(),
                    member.gender.as_str(),
                    member.mobile.as_str(),
                    member.address.as_str(),
                    member.plan.as_str(),
                    member.start_date.to_string().as_str(),
                    member
                        .end_date
                        .map(|d| d.to_string())
                        .unwrap_or_default()
                        .as_str(),
                    member.amount.to_string().as_str(),
                    match member.is_active {
                        Some(true) => "active",
                        Some(false) => "inactive",
                        None => "",
                    },
                    member.created_at.to_rfc3339().as_str(),
                ])?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

impl MemberStorage for MemberRepository {
    fn store_member(&self, member: &Member) -> Result<()> {
        let mut members = self.read_members()?;
        if members.iter().any(|m| m.member_id == member.member_id) {
            return Err(anyhow::anyhow!(
                "member id {} already exists",
                member.member_id
            ));
        }
        members.push(member.clone());
        self.write_members(&members)
    }

    fn get_member(&self, member_id: u32) -> Result<Option<Member>> {
        let members = self.read_members()?;
        Ok(members.into_iter().find(|m| m.member_id == member_id))
    }

    fn list_members(&self) -> Result<Vec<Member>> {
        self.read_members()
    }

    fn update_member(&self, member: &Member) -> Result<usize> {
        let mut members = self.read_members()?;
        let mut affected = 0;
        for existing in members.iter_mut() {
            if existing.member_id == member.member_id {
                *existing = member.clone();
                affected += 1;
            }
        }
        if affected > 0 {
            self.write_members(&members)?;
        }
        Ok(affected)
    }

    fn delete_member(&self, member_id: u32) -> Result<bool> {
        let mut members = self.read_members()?;
        let before = members.len();
        members.retain(|m| m.member_id != member_id);
        if members.len() == before {
            return Ok(false);
        }
        self.write_members(&members)?;
        Ok(true)
    }
}
