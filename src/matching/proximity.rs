//! Location "proximity" by text matching.
//!
//! There are no coordinates here: a location is free text such as
//! `"Vikhroli, Mumbai"`. A location containing the target ranks first, then one
//! sharing a comma-separated component with it (often only the state).

use crate::{auth::repo_types::User, jobs::repo_types::Job};

/// How close `location` is to `target`; lower is closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Closeness {
    Contains,
    SharedComponent,
    Unrelated,
}

fn components(location: &str) -> impl Iterator<Item = String> + '_ {
    location
        .split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
}

pub fn closeness(location: Option<&str>, target: &str) -> Closeness {
    let target = target.trim().to_lowercase();
    let Some(location) = location.map(|l| l.trim().to_lowercase()) else {
        return Closeness::Unrelated;
    };
    if target.is_empty() || location.is_empty() {
        return Closeness::Unrelated;
    }
    if location.contains(&target) {
        return Closeness::Contains;
    }
    let wanted: Vec<String> = components(&target).collect();
    if components(&location).any(|part| wanted.contains(&part)) {
        return Closeness::SharedComponent;
    }
    Closeness::Unrelated
}

fn sort_by_location<T>(items: &mut [T], target: &str, location: impl Fn(&T) -> Option<&str>) {
    if target.trim().is_empty() {
        return;
    }
    // sort_by_key is stable, so equal-rank items keep their input order
    items.sort_by_key(|item| closeness(location(item), target));
}

pub fn sort_by_proximity(mut jobs: Vec<Job>, target: &str) -> Vec<Job> {
    sort_by_location(&mut jobs, target, |j| Some(j.location.as_str()));
    jobs
}

pub fn sort_workers_by_proximity(mut workers: Vec<User>, target: &str) -> Vec<User> {
    sort_by_location(&mut workers, target, |w| w.location.as_deref());
    workers
}
