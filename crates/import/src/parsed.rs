use chrono::NaiveDate;
use memolabel_core::{Fragment, Label, Money};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Order {order_id}: charge {index} of {count} is out of range")]
    InvalidCharge {
        order_id: String,
        index: u32,
        count: u32,
    },
    #[error("Record has an empty id")]
    MissingId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmazonOrder {
    pub order_id: String,
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default)]
    pub items: Vec<String>,
    /// 1-based position of this charge when an order was billed in parts.
    #[serde(default)]
    pub charge_index: Option<u32>,
    #[serde(default)]
    pub charge_count: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetOrder {
    pub order_id: String,
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YnabRecord {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub payee: String,
    #[serde(default)]
    pub memo: String,
}

/// An import row in one of the supported source shapes, tagged by `_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "snake_case")]
pub enum ParsedLabel {
    Amazon(AmazonOrder),
    Target(TargetOrder),
    Ynab(YnabRecord),
}

impl ParsedLabel {
    pub fn into_label(self) -> Result<Label, ParseError> {
        match self {
            ParsedLabel::Amazon(order) => amazon_label(order),
            ParsedLabel::Target(order) => target_label(order),
            ParsedLabel::Ynab(record) => ynab_label(record),
        }
    }
}

fn amazon_label(order: AmazonOrder) -> Result<Label, ParseError> {
    require_id(&order.order_id)?;

    let mut fragments = Vec::new();
    let mut id = order.order_id.clone();

    if let (Some(index), Some(count)) = (order.charge_index, order.charge_count) {
        if index == 0 || index > count {
            return Err(ParseError::InvalidCharge {
                order_id: order.order_id,
                index,
                count,
            });
        }
        if count > 1 {
            id = format!("{}-{index}", order.order_id);
            fragments.push(Fragment::omittable(format!("(charge {index} of {count})")));
        }
    }

    push_items(&mut fragments, &order.items);
    push_url(&mut fragments, order.url.as_deref());

    Ok(Label {
        id,
        date: order.date,
        amount: order.amount,
        payee_name: "Amazon".to_string(),
        fragments,
    })
}

fn target_label(order: TargetOrder) -> Result<Label, ParseError> {
    require_id(&order.order_id)?;

    let mut fragments = Vec::new();
    push_items(&mut fragments, &order.items);
    push_url(&mut fragments, order.url.as_deref());

    Ok(Label {
        id: order.order_id,
        date: order.date,
        amount: order.amount,
        payee_name: "Target".to_string(),
        fragments,
    })
}

fn ynab_label(record: YnabRecord) -> Result<Label, ParseError> {
    require_id(&record.id)?;

    let mut fragments = Vec::new();
    if !record.memo.trim().is_empty() {
        fragments.push(Fragment::shrinkable(record.memo));
    }

    Ok(Label {
        id: record.id,
        date: record.date,
        amount: record.amount,
        payee_name: record.payee,
        fragments,
    })
}

fn require_id(id: &str) -> Result<(), ParseError> {
    if id.trim().is_empty() {
        return Err(ParseError::MissingId);
    }
    Ok(())
}

fn push_items(fragments: &mut Vec<Fragment>, items: &[String]) {
    let names: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !names.is_empty() {
        fragments.push(Fragment::shrinkable(names.join(", ")));
    }
}

fn push_url(fragments: &mut Vec<Fragment>, url: Option<&str>) {
    if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
        fragments.push(Fragment::omittable(url));
    }
}

/// Parse a JSON array of tagged records into labels, keeping input order.
pub fn parse_labels_json(data: &str) -> Result<Vec<Label>, ParseError> {
    let parsed: Vec<ParsedLabel> = serde_json::from_str(data)?;
    parsed.into_iter().map(ParsedLabel::into_label).collect()
}
