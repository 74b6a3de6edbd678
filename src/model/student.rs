use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// A student record as returned by the rankings endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient_key")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_results")]
    pub assessment_results: Option<Vec<AssessmentResult>>,
}

/// One scored attempt by a student on one workshop's assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    #[serde(
        default,
        deserialize_with = "workshop_key",
        skip_serializing_if = "WorkshopKey::is_missing"
    )]
    pub workshop_id: WorkshopKey,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<Score>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(default, deserialize_with = "lenient_marks")]
    pub obtained_marks: Option<f64>,
    #[serde(default, deserialize_with = "lenient_marks")]
    pub total_marks: Option<f64>,
}

impl Score {
    pub fn new(obtained_marks: f64, total_marks: f64) -> Self {
        Self {
            obtained_marks: Some(obtained_marks),
            total_marks: Some(total_marks),
        }
    }
}

impl AssessmentResult {
    pub fn new(workshop_id: impl Into<String>, score: Score) -> Self {
        Self {
            workshop_id: WorkshopKey::Id(workshop_id.into()),
            score: Some(score),
        }
    }
}

/// The workshop a result is grouped under.
///
/// A result without `workshopId` and one with `workshopId: null` land in
/// different groups. Numbers are keyed by their shortest decimal text, so
/// `7`, `7.0` and `"7"` are the same workshop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkshopKey {
    #[default]
    Missing,
    Null,
    Id(String),
}

impl WorkshopKey {
    pub fn id(&self) -> Option<&str> {
        match self {
            WorkshopKey::Id(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, WorkshopKey::Missing)
    }
}

impl Serialize for WorkshopKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WorkshopKey::Id(id) => serializer.serialize_str(id),
            _ => serializer.serialize_none(),
        }
    }
}

/// Envelope of `GET /student/rankings/{universityId}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RankingsPayload {
    #[serde(default)]
    pub data: Vec<Student>,
}

/// Text of a JSON number the way it reads as an object key in the browser:
/// integral values lose their fraction, `-0` is `0`.
fn number_key(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

fn lenient_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(number_key(&n)),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

// Only called when the field is present; an absent field stays `Missing`.
fn workshop_key<'de, D>(deserializer: D) -> Result<WorkshopKey, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None => WorkshopKey::Null,
        Some(Value::String(s)) => WorkshopKey::Id(s),
        Some(Value::Number(n)) => WorkshopKey::Id(number_key(&n)),
        Some(other) => WorkshopKey::Id(other.to_string()),
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_key(deserializer)?.unwrap_or_default())
}

fn lenient_marks<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<Score>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_results<'de, D>(deserializer: D) -> Result<Option<Vec<AssessmentResult>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}
