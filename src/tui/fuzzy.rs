//! Fuzzy subsequence matching for the filter box

/// A successful match of a query against a candidate string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    /// Higher is better
    pub score: i64,
    /// Char indices of the candidate that matched the query
    pub positions: Vec<usize>,
}

/// Match `query` against `candidate` as a case-insensitive subsequence
///
/// Consecutive runs and matches at word boundaries score higher. An empty
/// query matches everything with score 0.
pub fn fuzzy_match(candidate: &str, query: &str) -> Option<FuzzyMatch> {
    let query: Vec<char> = query.chars().map(fold).collect();
    if query.is_empty() {
        return Some(FuzzyMatch {
            score: 0,
            positions: Vec::new(),
        });
    }

    let hay: Vec<char> = candidate.chars().collect();
    let mut positions: Vec<usize> = Vec::with_capacity(query.len());
    let mut score = 0i64;
    let mut qi = 0usize;

    for (i, &hc) in hay.iter().enumerate() {
        if qi == query.len() {
            break;
        }
        if fold(hc) != query[qi] {
            continue;
        }

        score += 10;
        match positions.last() {
            Some(&prev) if i == prev + 1 => score += 8,
            Some(&prev) => score -= (i - prev - 1).min(5) as i64,
            None => score -= i.min(10) as i64,
        }
        if i == 0 || is_boundary(hay[i - 1]) {
            score += 6;
        }

        positions.push(i);
        qi += 1;
    }

    (qi == query.len()).then(|| FuzzyMatch {
        score: score - (hay.len() as i64 / 8),
        positions,
    })
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn is_boundary(c: char) -> bool {
    matches!(c, ' ' | '/' | '_' | '-' | '.' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_everything() {
        let m = fuzzy_match("anything", "").unwrap();
        assert_eq!(m.score, 0);
        assert!(m.positions.is_empty());
    }

    #[test]
    fn test_subsequence_positions() {
        let m = fuzzy_match("sessionizer", "szr").unwrap();
        assert_eq!(m.positions, vec![0, 8, 10]);
    }

    #[test]
    fn test_gap_between_matches_costs_score() {
        // 'a' at a boundary (10 + 6), then 'b' one char later (10 - 1)
        let m = fuzzy_match("axb", "ab").unwrap();
        assert_eq!(m.positions, vec![0, 2]);
        assert_eq!(m.score, 25);
    }

    #[test]
    fn test_case_insensitive() {
        assert!(fuzzy_match("NeoVim", "nv").is_some());
        assert!(fuzzy_match("neovim", "NV").is_some());
    }

    #[test]
    fn test_no_match() {
        assert!(fuzzy_match("nvim", "vin").is_none());
        assert!(fuzzy_match("abc", "abcd").is_none());
    }

    #[test]
    fn test_prefers_compact_match() {
        let compact = fuzzy_match("dotfiles", "dot").unwrap();
        let spread = fuzzy_match("d-o-t-x", "dot").unwrap();
        assert!(compact.score > spread.score);
    }

    #[test]
    fn test_prefers_word_boundary() {
        let boundary = fuzzy_match("my-app", "app").unwrap();
        let inner = fuzzy_match("myxapp", "app").unwrap();
        assert!(boundary.score > inner.score);
    }
}
