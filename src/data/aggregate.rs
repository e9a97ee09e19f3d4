use std::collections::BTreeMap;

use super::model::Catalog;

/// Number of groups shown in the charts and summary tables.
pub const TOP_N: usize = 20;

/// Publication count and citation total for one venue or author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStat {
    pub key: String,
    pub count: usize,
    pub cite_sum: u64,
}

/// Group visible rows by venue. Rows without a venue form their own group.
pub fn by_venue(catalog: &Catalog, indices: &[usize]) -> Vec<GroupStat> {
    group(
        indices
            .iter()
            .filter_map(|&i| catalog.get(i))
            .map(|p| (p.source.as_str(), p.cited_by)),
    )
}

/// Group visible rows by author. A paper with k authors counts once for each.
pub fn by_author(catalog: &Catalog, indices: &[usize]) -> Vec<GroupStat> {
    group(
        indices
            .iter()
            .filter_map(|&i| catalog.get(i))
            .flat_map(|p| p.author_names().map(move |a| (a, p.cited_by))),
    )
}

/// First `n` groups of an already ordered list.
pub fn top_n(stats: &[GroupStat], n: usize) -> &[GroupStat] {
    &stats[..stats.len().min(n)]
}

/// Count and sum per key; result ordered by count desc, then key asc.
fn group<'a>(memberships: impl Iterator<Item = (&'a str, u32)>) -> Vec<GroupStat> {
    let mut groups: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
    for (key, cites) in memberships {
        let entry = groups.entry(key).or_default();
        entry.0 += 1;
        entry.1 += u64::from(cites);
    }

    let mut stats: Vec<GroupStat> = groups
        .into_iter()
        .map(|(key, (count, cite_sum))| GroupStat {
            key: key.to_string(),
            count,
            cite_sum,
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}
