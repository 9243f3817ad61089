use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// 記錄的識別碼，API 可能回傳數字或字串
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self::new(s.trim())),
            Value::Number(n) => Some(Self::new(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid id: {}", value)))
    }
}

/// 指向其他記錄的參照，例如 `https://host/api/kurse/7/`
///
/// 識別碼是最後一段路徑，解析時就取出，查詢不必再處理傳輸格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    raw: String,
    id: Option<EntityId>,
}

impl EntityRef {
    pub fn parse(raw: &str) -> Self {
        let id = raw
            .trim()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(EntityId::new);

        Self {
            raw: raw.to_string(),
            id,
        }
    }

    pub fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// 不認得的形狀一律變成沒有 id 的參照，查詢時顯示佔位符
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => Self::parse(&n.to_string()),
            // 巢狀物件 {"id": 3, ...}
            Value::Object(obj) => match obj.get("id").and_then(EntityId::from_json) {
                Some(id) => EntityRef::from(&id),
                None => Self::unresolved(value),
            },
            other => Self::unresolved(other),
        }
    }

    fn unresolved(value: &Value) -> Self {
        Self {
            raw: value.to_string(),
            id: None,
        }
    }
}

impl From<&EntityId> for EntityRef {
    fn from(id: &EntityId) -> Self {
        Self {
            raw: id.as_str().to_string(),
            id: Some(id.clone()),
        }
    }
}

impl Serialize for EntityRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for EntityRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// 付款狀態：只有 `true` 算已付；缺少、`null`、`false`、`0`、`""` 算未付，
/// 其餘都是 `Unknown`，兩邊都不計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
    Unknown,
}

impl PaymentStatus {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Bool(true) => PaymentStatus::Paid,
            Value::Null | Value::Bool(false) => PaymentStatus::Unpaid,
            Value::Number(n) if n.as_f64() == Some(0.0) => PaymentStatus::Unpaid,
            Value::String(s) if s.is_empty() => PaymentStatus::Unpaid,
            _ => PaymentStatus::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// 解析日期時間；無法解析的值視為缺少
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date())
}

/// 價格可能是數字或字串（"100.00"）
pub fn parse_price(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_date))
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_timestamp))
}

/// 文字欄位：純量轉成字串，其他形狀視為缺少
pub fn parse_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(parse_text(&value))
}

fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(parse_price(&value))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Kurs {
    pub id: EntityId,
    #[serde(default, alias = "title", deserialize_with = "deserialize_text")]
    pub titel: Option<String>,
    #[serde(default, alias = "price", deserialize_with = "deserialize_price")]
    pub preis: Option<Decimal>,
    #[serde(default, alias = "start_date", deserialize_with = "deserialize_date")]
    pub startdatum: Option<NaiveDate>,
    #[serde(default, alias = "end_date", deserialize_with = "deserialize_date")]
    pub enddatum: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Teilnehmer {
    pub id: EntityId,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
}

/// 其他欄位不需要
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Raum {
    pub id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dozent {
    pub id: EntityId,
}

/// 報名：連結學員與課程
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Anmeldung {
    pub id: EntityId,
    #[serde(default, alias = "participant")]
    pub teilnehmer: Option<EntityRef>,
    #[serde(default, alias = "course")]
    pub kurs: Option<EntityRef>,
    #[serde(
        default,
        alias = "registration_date",
        deserialize_with = "deserialize_timestamp"
    )]
    pub anmeldedatum: Option<NaiveDateTime>,
    #[serde(default, alias = "paid")]
    pub bezahlt: PaymentStatus,
}

/// 一次載入的五個集合
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub dozenten: Vec<Dozent>,
    pub teilnehmer: Vec<Teilnehmer>,
    pub raeume: Vec<Raum>,
    pub kurse: Vec<Kurs>,
    pub anmeldungen: Vec<Anmeldung>,
}
