// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{MessageTimestamp, NonceRecord, SiweNonce};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const PREAMBLE: &str = " wants you to sign in with your Ethereum account:";
const URI_TAG: &str = "URI: ";
const VERSION_TAG: &str = "Version: ";
const CHAIN_ID_TAG: &str = "Chain ID: ";
const NONCE_TAG: &str = "Nonce: ";
const ISSUED_AT_TAG: &str = "Issued At: ";
const EXPIRATION_TIME_TAG: &str = "Expiration Time: ";
const NOT_BEFORE_TAG: &str = "Not Before: ";
const REQUEST_ID_TAG: &str = "Request ID: ";
const RESOURCES_TAG: &str = "Resources:";
const RESOURCE_ITEM_TAG: &str = "- ";

pub const SUPPORTED_VERSION: &str = "1";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// EIP-4361 challenge message.
///
/// The [`fmt::Display`] implementation produces the canonical text that wallets
/// sign, and [`FromStr`] parses exactly that text back. Rendering is
/// deterministic: equal messages always produce identical bytes.
///
/// See <https://eips.ethereum.org/EIPS/eip-4361>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeMessage {
    pub domain: String,
    pub address: Address,
    pub statement: Option<String>,
    pub uri: String,
    pub version: String,
    pub chain_id: u64,
    pub nonce: String,
    pub issued_at: MessageTimestamp,
    pub expiration_time: Option<MessageTimestamp>,
    pub not_before: Option<MessageTimestamp>,
    pub request_id: Option<String>,
    pub resources: Vec<String>,
}

impl ChallengeMessage {
    pub fn builder(
        domain: impl Into<String>,
        address: Address,
        uri: impl Into<String>,
    ) -> ChallengeMessageBuilder {
        ChallengeMessageBuilder::new(domain.into(), address, uri.into())
    }

    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }

    pub fn validate(&self) -> Result<(), MalformedMessageError> {
        if self.domain.is_empty() {
            return Err(MalformedMessageError::MissingField { field: "domain" });
        }
        if self.domain.chars().any(char::is_whitespace) {
            return Err(MalformedMessageError::invalid(
                "domain",
                "must not contain whitespace",
            ));
        }
        Self::ensure_single_line("domain", &self.domain)?;

        if let Some(statement) = &self.statement {
            Self::ensure_single_line("statement", statement)?;
        }

        Self::ensure_single_line("uri", &self.uri)?;
        url::Url::parse(&self.uri)
            .map_err(|e| MalformedMessageError::invalid("uri", e.to_string()))?;

        if self.version != SUPPORTED_VERSION {
            return Err(MalformedMessageError::invalid(
                "version",
                format!("unsupported version {:?}", self.version),
            ));
        }

        if !SiweNonce::is_valid(&self.nonce) {
            return Err(MalformedMessageError::invalid(
                "nonce",
                "must be at least 8 alphanumeric characters",
            ));
        }

        if let Some(request_id) = &self.request_id {
            Self::ensure_single_line("requestId", request_id)?;
        }

        for resource in &self.resources {
            Self::ensure_single_line("resources", resource)?;
            url::Url::parse(resource)
                .map_err(|e| MalformedMessageError::invalid("resources", e.to_string()))?;
        }

        Ok(())
    }

    // The URL parser drops tabs and newlines before parsing, so raw values
    // must be checked before they are rendered line by line
    fn ensure_single_line(
        field: &'static str,
        value: &str,
    ) -> Result<(), MalformedMessageError> {
        if value.chars().any(char::is_control) {
            return Err(MalformedMessageError::invalid(
                field,
                "must be a single line without control characters",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ChallengeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{PREAMBLE}", self.domain)?;
        writeln!(f, "{}", self.address.to_checksum(None))?;
        writeln!(f)?;
        if let Some(statement) = &self.statement {
            writeln!(f, "{statement}")?;
        }
        writeln!(f)?;
        writeln!(f, "{URI_TAG}{}", self.uri)?;
        writeln!(f, "{VERSION_TAG}{}", self.version)?;
        writeln!(f, "{CHAIN_ID_TAG}{}", self.chain_id)?;
        writeln!(f, "{NONCE_TAG}{}", self.nonce)?;
        write!(f, "{ISSUED_AT_TAG}{}", self.issued_at)?;
        if let Some(expiration_time) = &self.expiration_time {
            write!(f, "\n{EXPIRATION_TIME_TAG}{expiration_time}")?;
        }
        if let Some(not_before) = &self.not_before {
            write!(f, "\n{NOT_BEFORE_TAG}{not_before}")?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, "\n{REQUEST_ID_TAG}{request_id}")?;
        }
        if !self.resources.is_empty() {
            write!(f, "\n{RESOURCES_TAG}")?;
            for resource in &self.resources {
                write!(f, "\n{RESOURCE_ITEM_TAG}{resource}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for ChallengeMessage {
    type Err = MalformedMessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = Lines::new(s);

        let (line, header) = lines.next_line("domain")?;
        let domain = header
            .strip_suffix(PREAMBLE)
            .ok_or(MalformedMessageError::UnexpectedLine {
                line,
                expected: "preamble",
            })?;

        let (_, address) = lines.next_line("address")?;
        let address = parse_address(address)?;

        lines.blank()?;

        let (_, maybe_statement) = lines.next_line("statement")?;
        let statement = if maybe_statement.is_empty() {
            None
        } else {
            lines.blank()?;
            Some(maybe_statement.to_string())
        };

        let uri = lines.tagged(URI_TAG, "uri")?;
        let version = lines.tagged(VERSION_TAG, "version")?;
        let chain_id = lines
            .tagged(CHAIN_ID_TAG, "chainId")?
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                MalformedMessageError::invalid("chainId", e.to_string())
            })?;
        let nonce = lines.tagged(NONCE_TAG, "nonce")?;
        let issued_at = parse_timestamp("issuedAt", lines.tagged(ISSUED_AT_TAG, "issuedAt")?)?;
        let expiration_time = lines
            .optional_tagged(EXPIRATION_TIME_TAG)
            .map(|v| parse_timestamp("expirationTime", v))
            .transpose()?;
        let not_before = lines
            .optional_tagged(NOT_BEFORE_TAG)
            .map(|v| parse_timestamp("notBefore", v))
            .transpose()?;
        let request_id = lines.optional_tagged(REQUEST_ID_TAG).map(str::to_string);

        let mut resources = Vec::new();
        if lines.optional_exact(RESOURCES_TAG) {
            while let Some(resource) = lines.optional_tagged(RESOURCE_ITEM_TAG) {
                resources.push(resource.to_string());
            }
        }

        lines.finish()?;

        let message = Self {
            domain: domain.to_string(),
            address,
            statement,
            uri: uri.to_string(),
            version: version.to_string(),
            chain_id,
            nonce: nonce.to_string(),
            issued_at,
            expiration_time,
            not_before,
            request_id,
            resources,
        };
        message.validate()?;

        Ok(message)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Accepts EIP-55 checksummed addresses as well as single-case hex
pub(crate) fn parse_address(value: &str) -> Result<Address, MalformedMessageError> {
    let Some(digits) = value.strip_prefix("0x") else {
        return Err(MalformedMessageError::invalid(
            "address",
            "must start with 0x",
        ));
    };

    let address = Address::from_str(value)
        .map_err(|e| MalformedMessageError::invalid("address", e.to_string()))?;

    let is_single_case =
        digits == digits.to_ascii_lowercase() || digits == digits.to_ascii_uppercase();
    if !is_single_case && address.to_checksum(None) != value {
        return Err(MalformedMessageError::invalid(
            "address",
            "EIP-55 checksum mismatch",
        ));
    }

    Ok(address)
}

pub(crate) fn parse_timestamp(
    field: &'static str,
    value: &str,
) -> Result<MessageTimestamp, MalformedMessageError> {
    value
        .parse()
        .map_err(|e: chrono::ParseError| MalformedMessageError::invalid(field, e.to_string()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct Lines<'a> {
    inner: std::iter::Peekable<std::iter::Enumerate<std::str::Split<'a, char>>>,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split('\n').enumerate().peekable(),
        }
    }

    fn next_line(
        &mut self,
        field: &'static str,
    ) -> Result<(usize, &'a str), MalformedMessageError> {
        self.inner
            .next()
            .map(|(i, line)| (i + 1, line))
            .ok_or(MalformedMessageError::MissingField { field })
    }

    fn blank(&mut self) -> Result<(), MalformedMessageError> {
        let (line, text) = self.next_line("blank line")?;
        if !text.is_empty() {
            return Err(MalformedMessageError::UnexpectedLine {
                line,
                expected: "blank line",
            });
        }
        Ok(())
    }

    fn tagged(
        &mut self,
        tag: &'static str,
        field: &'static str,
    ) -> Result<&'a str, MalformedMessageError> {
        let (line, text) = self.next_line(field)?;
        text.strip_prefix(tag)
            .ok_or(MalformedMessageError::UnexpectedLine {
                line,
                expected: field,
            })
    }

    fn optional_tagged(&mut self, tag: &str) -> Option<&'a str> {
        match self.inner.peek() {
            Some((_, text)) if text.starts_with(tag) => {
                let (_, text) = self.inner.next()?;
                text.strip_prefix(tag)
            }
            _ => None,
        }
    }

    fn optional_exact(&mut self, expected: &str) -> bool {
        match self.inner.peek() {
            Some((_, text)) if *text == expected => {
                self.inner.next();
                true
            }
            _ => false,
        }
    }

    fn finish(mut self) -> Result<(), MalformedMessageError> {
        match self.inner.next() {
            Some((i, _)) => Err(MalformedMessageError::TrailingContent { line: i + 1 }),
            None => Ok(()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fluent assembly of a [`ChallengeMessage`], usually from a freshly issued
/// [`NonceRecord`]
#[derive(Debug, Clone)]
pub struct ChallengeMessageBuilder {
    domain: String,
    address: Address,
    statement: Option<String>,
    uri: String,
    chain_id: u64,
    nonce: Option<String>,
    issued_at: Option<MessageTimestamp>,
    expiration_time: Option<MessageTimestamp>,
    not_before: Option<MessageTimestamp>,
    request_id: Option<String>,
    resources: Vec<String>,
}

impl ChallengeMessageBuilder {
    pub const DEFAULT_CHAIN_ID: u64 = 1;

    fn new(domain: String, address: Address, uri: String) -> Self {
        Self {
            domain,
            address,
            statement: None,
            uri,
            chain_id: Self::DEFAULT_CHAIN_ID,
            nonce: None,
            issued_at: None,
            expiration_time: None,
            not_before: None,
            request_id: None,
            resources: Vec::new(),
        }
    }

    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Takes nonce, issue and expiration times from the record
    pub fn nonce_record(mut self, record: &NonceRecord) -> Self {
        self.nonce = Some(record.nonce.as_str().to_string());
        self.issued_at = Some(MessageTimestamp::from_datetime(record.issued_at));
        self.expiration_time = Some(MessageTimestamp::from_datetime(record.expiration_time));
        self
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = Some(MessageTimestamp::from_datetime(issued_at));
        self
    }

    pub fn expiration_time(mut self, expiration_time: DateTime<Utc>) -> Self {
        self.expiration_time = Some(MessageTimestamp::from_datetime(expiration_time));
        self
    }

    pub fn not_before(mut self, not_before: DateTime<Utc>) -> Self {
        self.not_before = Some(MessageTimestamp::from_datetime(not_before));
        self
    }

    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resources.push(resource.into());
        self
    }

    pub fn build(self) -> Result<ChallengeMessage, MalformedMessageError> {
        let message = ChallengeMessage {
            domain: self.domain,
            address: self.address,
            statement: self.statement.filter(|s| !s.is_empty()),
            uri: self.uri,
            version: SUPPORTED_VERSION.to_string(),
            chain_id: self.chain_id,
            nonce: self
                .nonce
                .ok_or(MalformedMessageError::MissingField { field: "nonce" })?,
            issued_at: self
                .issued_at
                .ok_or(MalformedMessageError::MissingField { field: "issuedAt" })?,
            expiration_time: self.expiration_time,
            not_before: self.not_before,
            request_id: self.request_id,
            resources: self.resources,
        };
        message.validate()?;

        Ok(message)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedMessageError {
    #[error("Malformed message: missing {field}")]
    MissingField { field: &'static str },

    #[error("Malformed message: invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Malformed message: expected {expected} at line {line}")]
    UnexpectedLine { line: usize, expected: &'static str },

    #[error("Malformed message: unexpected content at line {line}")]
    TrailingContent { line: usize },
}

impl MalformedMessageError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
