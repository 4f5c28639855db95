use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::entity::{Incident, Person};

/// One row of the ranking: a person and their aggregated incidents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub person: Person,
    pub points: usize,
    /// Timestamp of the person's most recent incident.
    pub last_incident_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct Tally {
    count: usize,
    last: Option<DateTime<Utc>>,
}

/// Aggregate incidents per person and order by points, descending.
///
/// Runs in one pass over each collection. The sort is stable, so people with
/// equal points keep their order in `people` (insertion order).
pub fn compute(people: &[Person], incidents: &[Incident]) -> Vec<RankingEntry> {
    let mut tallies: HashMap<&str, Tally> = HashMap::with_capacity(people.len());
    for incident in incidents {
        let tally = tallies.entry(incident.person_id.as_str()).or_default();
        tally.count += 1;
        tally.last = tally.last.max(Some(incident.occurred_at));
    }

    let mut ranking: Vec<RankingEntry> = people
        .iter()
        .map(|person| {
            let tally = tallies.remove(person.id.as_str()).unwrap_or_default();
            RankingEntry {
                person: person.clone(),
                points: tally.count,
                last_incident_at: tally.last,
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.points.cmp(&a.points));
    ranking
}
