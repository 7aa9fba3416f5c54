//! Response key normalization.
//!
//! Spark payloads carry a `_t` discriminator naming their response type and
//! terse field codes. [`normalize`] renames the codes of known response types
//! to canonical names. Records with an unknown or missing tag pass through
//! untouched so new payload shapes never break the pipeline.

mod key_maps;

use serde_json::{Map, Value};

/// Field carrying the response-type discriminator.
pub const RESPONSE_TYPE_KEY: &str = "_t";

/// Response types with a registered key map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    AuthResult,
    StructAccountTransaction,
    RMType,
    RMTotalType,
    SecuritiesData,
    SecuritiesTotalType,
    ChartPoint,
}

impl ResponseType {
    pub const ALL: [ResponseType; 7] = [
        ResponseType::AuthResult,
        ResponseType::StructAccountTransaction,
        ResponseType::RMType,
        ResponseType::RMTotalType,
        ResponseType::SecuritiesData,
        ResponseType::SecuritiesTotalType,
        ResponseType::ChartPoint,
    ];

    /// The `_t` tag value identifying this response type.
    pub fn tag(self) -> &'static str {
        match self {
            ResponseType::AuthResult => "AuthResult",
            ResponseType::StructAccountTransaction => "StructAccountTransaction",
            ResponseType::RMType => "RMType",
            ResponseType::RMTotalType => "RMTotalType",
            ResponseType::SecuritiesData => "SecuritiesData",
            ResponseType::SecuritiesTotalType => "SecuritiesTotalType",
            ResponseType::ChartPoint => "ChartPoint",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Code → canonical name pairs for this response type.
    pub fn key_map(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ResponseType::AuthResult => key_maps::AUTH_RESULT,
            ResponseType::StructAccountTransaction => key_maps::STRUCT_ACCOUNT_TRANSACTION,
            ResponseType::RMType => key_maps::RM_TYPE,
            ResponseType::RMTotalType => key_maps::RM_TOTAL_TYPE,
            ResponseType::SecuritiesData => key_maps::SECURITIES_DATA,
            ResponseType::SecuritiesTotalType => key_maps::SECURITIES_TOTAL_TYPE,
            ResponseType::ChartPoint => key_maps::CHART_POINT,
        }
    }

    /// Canonical name for a field code, if the code is registered.
    pub fn canonical_name(self, code: &str) -> Option<&'static str> {
        self.key_map()
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    }
}

/// Read the response type of a raw record from its `_t` tag.
pub fn response_type_of(record: &Value) -> Option<ResponseType> {
    record
        .get(RESPONSE_TYPE_KEY)
        .and_then(Value::as_str)
        .and_then(ResponseType::from_tag)
}

/// Normalize a raw record using the key map selected by its own `_t` tag.
pub fn normalize(record: Value) -> Value {
    let response_type = response_type_of(&record);
    normalize_as(record, response_type)
}

/// Normalize a raw record with an explicit key map.
///
/// `None` means "no map registered" and yields the record unchanged.
/// Non-object values are returned as-is.
pub fn normalize_as(record: Value, response_type: Option<ResponseType>) -> Value {
    let Some(response_type) = response_type else {
        return record;
    };

    match record {
        Value::Object(fields) => {
            let renamed: Map<String, Value> = fields
                .into_iter()
                .map(|(key, value)| {
                    let key = response_type
                        .canonical_name(&key)
                        .map(str::to_string)
                        .unwrap_or(key);
                    (key, value)
                })
                .collect();
            Value::Object(renamed)
        }
        other => other,
    }
}
