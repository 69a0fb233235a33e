use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::input::{InputError, read_records_lenient};

/// One proposal/project row. Recognised attributes are named fields; the
/// rest of the payload rides along in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalRecord {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub fund: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub ideascale_user: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub proposer: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub proposer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub proposer_full_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    #[serde(
        rename = "fundingAmount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub funding_amount: Option<FundingAmount>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProposalRecord {
    /// Person name fields in extraction order.
    pub fn person_fields(&self) -> [Option<&str>; 4] {
        [
            self.ideascale_user.as_deref(),
            self.proposer.as_deref(),
            self.proposer_name.as_deref(),
            self.proposer_full_name.as_deref(),
        ]
    }

    /// Organization name fields in extraction order.
    pub fn organization_fields(&self) -> [Option<&str>; 3] {
        [
            self.organization.as_deref(),
            self.company.as_deref(),
            self.team.as_deref(),
        ]
    }

    /// Funding as a number; absent or unparseable amounts read as zero.
    /// `fundingAmount` wins over a snake_case `funding_amount` left in `extra`.
    pub fn funding_value(&self) -> f64 {
        let amount = match &self.funding_amount {
            Some(amount) => amount.as_f64(),
            None => self
                .extra
                .get("funding_amount")
                .cloned()
                .and_then(|v| serde_json::from_value::<FundingAmount>(v).ok())
                .and_then(|amount| amount.as_f64()),
        };
        amount.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FundingAmount {
    Number(f64),
    Text(String),
    Other(Value),
}

impl FundingAmount {
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            FundingAmount::Number(v) => *v,
            FundingAmount::Text(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
            FundingAmount::Other(_) => return None,
        };
        v.is_finite().then_some(v)
    }
}

pub fn load_proposals(path: &Path) -> Result<Vec<ProposalRecord>, InputError> {
    let records: Vec<ProposalRecord> = read_records_lenient(path)?;
    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "loaded proposal records"
    );
    Ok(records)
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
