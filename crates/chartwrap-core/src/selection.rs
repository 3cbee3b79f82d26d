//! Candidate narrowing, grouping and selection
//!
//! These functions decide which chart to use. They never prompt; the caller
//! supplies the operator's answer (or none) so the same rules run unattended.

use indexmap::IndexMap;

use crate::reference::ChartCandidate;
use crate::version::compare_versions;

/// Keep only candidates whose chart name equals the query's, if there are any
///
/// A repository search matches substrings, so `redis` also finds
/// `redis-cluster`. When nothing matches exactly the list is returned as is.
pub fn narrow_to_exact(query: &str, candidates: Vec<ChartCandidate>) -> Vec<ChartCandidate> {
    let wanted = query.rsplit('/').next().unwrap_or(query);
    if !candidates.iter().any(|c| c.bare_name() == wanted) {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|c| c.bare_name() == wanted)
        .collect()
}

/// Group by repository, sort each group by version descending, cap each group
///
/// Repositories keep the order in which they first appear in `candidates`.
pub fn group_and_cap(candidates: Vec<ChartCandidate>, max_per_repo: usize) -> Vec<ChartCandidate> {
    let mut groups: IndexMap<String, Vec<ChartCandidate>> = IndexMap::new();
    for candidate in candidates {
        groups
            .entry(candidate.repo_name.clone())
            .or_default()
            .push(candidate);
    }

    groups
        .into_values()
        .flat_map(|mut group| {
            group.sort_by(|a, b| compare_versions(&b.version, &a.version));
            group.truncate(max_per_repo);
            group
        })
        .collect()
}

/// Pick a candidate from a 1-based answer
///
/// Empty, non-numeric or out-of-range answers fall back to the first
/// candidate. Returns `None` only when there are no candidates.
pub fn select_candidate<'a>(
    candidates: &'a [ChartCandidate],
    answer: Option<&str>,
) -> Option<&'a ChartCandidate> {
    let chosen = answer
        .and_then(|a| a.trim().parse::<usize>().ok())
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| candidates.get(index));

    chosen.or_else(|| candidates.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(rows: &[(&str, &str)]) -> Vec<ChartCandidate> {
        rows.iter()
            .map(|(name, version)| ChartCandidate::new(*name, *version))
            .collect()
    }

    #[test]
    fn test_group_sort_cap() {
        let input = candidates(&[
            ("bitnami/redis", "9.0.0"),
            ("other/redis", "1.0.0"),
            ("bitnami/redis", "10.0.0"),
            ("bitnami/redis", "17.3.1"),
            ("bitnami/redis", "17.10.0"),
            ("bitnami/redis", "2.0.0"),
            ("bitnami/redis", "11.0.0"),
            ("other/redis", "1.1.0"),
        ]);

        let grouped = group_and_cap(input, 5);
        let rows: Vec<(&str, &str)> = grouped
            .iter()
            .map(|c| (c.repo_name.as_str(), c.version.as_str()))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("bitnami", "17.10.0"),
                ("bitnami", "17.3.1"),
                ("bitnami", "11.0.0"),
                ("bitnami", "10.0.0"),
                ("bitnami", "9.0.0"),
                ("other", "1.1.0"),
                ("other", "1.0.0"),
            ]
        );
    }

    #[test]
    fn test_group_cap_holds_for_every_repo() {
        let mut input = Vec::new();
        for repo in ["a", "b", "c"] {
            for minor in 0..12 {
                input.push(ChartCandidate::new(format!("{repo}/app"), format!("1.{minor}.0")));
            }
        }

        let grouped = group_and_cap(input, 5);
        for repo in ["a", "b", "c"] {
            let versions: Vec<&str> = grouped
                .iter()
                .filter(|c| c.repo_name == repo)
                .map(|c| c.version.as_str())
                .collect();
            assert_eq!(versions, vec!["1.11.0", "1.10.0", "1.9.0", "1.8.0", "1.7.0"]);
        }
    }

    #[test]
    fn test_narrow_to_exact() {
        let input = candidates(&[
            ("bitnami/redis-cluster", "9.0.0"),
            ("bitnami/redis", "18.0.0"),
        ]);
        let narrowed = narrow_to_exact("redis", input);
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].full_name, "bitnami/redis");

        let narrowed = narrow_to_exact("bitnami/redis", candidates(&[("bitnami/redis", "1.0.0")]));
        assert_eq!(narrowed.len(), 1);

        let untouched = narrow_to_exact("red", candidates(&[("bitnami/redis", "1.0.0")]));
        assert_eq!(untouched.len(), 1);
    }

    #[test]
    fn test_select_candidate() {
        let list = candidates(&[("a/x", "2.0.0"), ("a/x", "1.0.0"), ("b/x", "3.0.0")]);

        assert_eq!(select_candidate(&list, Some("2")).unwrap().version, "1.0.0");
        assert_eq!(select_candidate(&list, Some(" 3 ")).unwrap().repo_name, "b");
        assert_eq!(select_candidate(&list, Some("")).unwrap().version, "2.0.0");
        assert_eq!(select_candidate(&list, Some("0")).unwrap().version, "2.0.0");
        assert_eq!(select_candidate(&list, Some("9")).unwrap().version, "2.0.0");
        assert_eq!(select_candidate(&list, Some("two")).unwrap().version, "2.0.0");
        assert_eq!(select_candidate(&list, None).unwrap().version, "2.0.0");
        assert!(select_candidate(&[], Some("1")).is_none());
    }
}
