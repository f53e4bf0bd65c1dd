use std::{collections::BTreeMap, sync::Arc};

use rust_decimal::Decimal;
use serde::Serialize;

use salestrack_core::{Collection, Record};

/// Summed sales for one key value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: Decimal,
    pub records: usize,
}

/// Sums sales per distinct key, one row per key in ascending key order.
pub fn sum_by<K, F>(collection: &Collection, key: F) -> Vec<GroupTotal<K>>
where
    K: Ord,
    F: Fn(&Record) -> K,
{
    let mut groups: BTreeMap<K, (Decimal, usize)> = BTreeMap::new();
    for record in collection {
        let entry = groups.entry(key(record)).or_insert((Decimal::ZERO, 0));
        entry.0 += record.sales();
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(key, (total, records))| GroupTotal { key, total, records })
        .collect()
}

pub fn sum_by_area(collection: &Collection) -> Vec<GroupTotal<Arc<str>>> {
    sum_by(collection, Record::area_label)
}

pub fn sum_by_month(collection: &Collection) -> Vec<GroupTotal<u8>> {
    sum_by(collection, Record::month)
}

pub fn total(collection: &Collection) -> Decimal {
    collection.iter().map(Record::sales).sum()
}
