//! HTTP backend module.
//!
//! This module contains the backend talking to the remote letters and
//! reports collections over HTTP, using JSON bodies. Every request is
//! bounded by the configured timeout.

use log::{debug, info, trace};
use reqwest::{blocking::Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::result;
use thiserror::Error;

use crate::{backend, sender, Backend, Draft, HttpConfig, Letters, Report, Reports, Sender};

use super::records::{self, NewLetterRecord, ReportRecord};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot build http client")]
    BuildClientError(#[source] reqwest::Error),
    #[error("cannot fetch {1}")]
    FetchError(#[source] reqwest::Error, String),
    #[error("cannot fetch {1}: unexpected status {0}")]
    FetchStatusError(StatusCode, String),
    #[error("cannot parse collection from {1}")]
    ParseCollectionError(#[source] reqwest::Error, String),
    #[error("cannot post to {1}")]
    PostError(#[source] reqwest::Error, String),
    #[error("cannot post to {1}: unexpected status {0}")]
    PostStatusError(StatusCode, String),

    #[error("cannot parse record")]
    ParseRecordError(#[source] serde_json::Error),
    #[error("cannot find record field {0}")]
    MissingFieldError(&'static str),
}

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: HttpConfig,
    client: Client,
}

impl HttpBackend {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(Error::BuildClientError)?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    fn fetch(&self, url: &str) -> Result<Vec<Value>> {
        debug!("fetching collection {}", url);

        let res = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|err| Error::FetchError(err, url.to_owned()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::FetchStatusError(status, url.to_owned()));
        }

        let values: Vec<Value> = res
            .json()
            .map_err(|err| Error::ParseCollectionError(err, url.to_owned()))?;
        trace!("collection {}: {:?}", url, values);

        Ok(values)
    }

    fn post<T: Serialize>(&self, url: &str, record: &T) -> Result<()> {
        debug!("posting record to {}", url);

        let res = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .json(record)
            .send()
            .map_err(|err| Error::PostError(err, url.to_owned()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::PostStatusError(status, url.to_owned()));
        }

        Ok(())
    }
}

impl Backend for HttpBackend {
    fn list_letters(&self) -> backend::Result<Letters> {
        let values = self.fetch(&self.config.letters_url)?;
        Ok(records::decode_letters(values))
    }

    fn list_reports(&self) -> backend::Result<Reports> {
        let values = self.fetch(&self.config.reports_url)?;
        Ok(records::decode_reports(values))
    }
}

impl Sender for HttpBackend {
    fn send_letter(&mut self, sender_id: &str, draft: &Draft, timestamp: i64) -> sender::Result<()> {
        let record = NewLetterRecord::new(sender_id, draft, timestamp);
        self.post(&self.config.letters_url, &record)?;
        info!("letter sent");
        Ok(())
    }

    fn send_report(&mut self, report: &Report) -> sender::Result<()> {
        self.post(&self.config.reports_url, &ReportRecord::from(report))?;
        info!("letter {} reported", report.letter_id);
        Ok(())
    }
}
