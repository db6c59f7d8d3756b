// src/models/dates.rs
//
// Os clientes mandam datas em três formatos: só a data ("1938-11-27"),
// data e hora sem fuso ("1938-11-27T00:00:00") ou RFC 3339 com fuso.
// Sem fuso, o horário é tomado como UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de::Error, Deserialize, Deserializer};

pub fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    if let Ok(date_time) = raw.parse::<NaiveDateTime>() {
        return Some(date_time);
    }
    raw.parse::<NaiveDate>().ok().and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(with_offset) => Some(with_offset.with_timezone(&Utc)),
        Err(_) => parse_naive(raw).map(|naive| naive.and_utc()),
    }
}

// Para `#[serde(deserialize_with = ...)]` em campos `Option<NaiveDateTime>`.
pub fn optional_naive<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_naive(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("data inválida: {raw}"))),
        None => Ok(None),
    }
}

// Idem, para `Option<DateTime<Utc>>`.
pub fn optional_utc<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_utc(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("data inválida: {raw}"))),
        None => Ok(None),
    }
}
