use crate::datetime::{to_local, to_utc, DatetimeValue, LocalZone};
use crate::errors::Result;
use crate::value::{Record, Value};
use chrono::Utc;

/// Rebuild `value`, passing every datetime leaf through `convert`.
fn map_datetimes<F>(value: &Value, convert: &F) -> Result<Value>
where
    F: Fn(&DatetimeValue) -> Result<DatetimeValue>,
{
    let mapped = match value {
        Value::Datetime(dt) => Value::Datetime(convert(dt)?),
        Value::Sequence(items) => Value::Sequence(map_items(items, convert)?),
        Value::Set(items) => Value::set(map_items(items, convert)?),
        Value::Mapping(record) => {
            let mut out = Record::new();
            for (key, item) in record.iter() {
                out.insert(key, map_datetimes(item, convert)?);
            }
            Value::Mapping(out)
        }
        leaf => leaf.clone(),
    };
    Ok(mapped)
}

fn map_items<F>(items: &[Value], convert: &F) -> Result<Vec<Value>>
where
    F: Fn(&DatetimeValue) -> Result<DatetimeValue>,
{
    items.iter().map(|item| map_datetimes(item, convert)).collect()
}

/// Convert every datetime in a container to local wall-clock time.
///
/// Each leaf goes through [`to_local`] with the given flags; the first
/// failing leaf fails the whole call.
///
/// # Errors
///
/// Any error [`to_local`] raises for a leaf.
pub fn bulk_to_local(
    value: &Value,
    zone: &LocalZone,
    allow_naive_input: bool,
    strict_utc: bool,
) -> Result<Value> {
    map_datetimes(value, &|dt| {
        to_local(dt, zone, allow_naive_input, strict_utc)
    })
}

/// Convert every datetime in a container to an aware value at UTC.
///
/// Naive leaves are read as local time; aware leaves are re-expressed at
/// offset zero.
///
/// # Errors
///
/// Any error [`to_utc`] raises for a naive leaf.
pub fn bulk_to_utc(value: &Value, zone: &LocalZone) -> Result<Value> {
    map_datetimes(value, &|dt| match dt {
        DatetimeValue::Naive(_) => to_utc(dt, zone),
        DatetimeValue::Aware(aware) => Ok(DatetimeValue::Aware(
            aware.with_timezone(&Utc).fixed_offset(),
        )),
    })
}
