//! Stutter pre-pass: collapses a partial-render-then-full-redraw pattern
//! before the main contiguous-block scan runs.

/// For each raw line, the index it ultimately resolves to: itself if not
/// part of a stutter, otherwise the later surviving copy (following
/// chains of stutters to their final target).
///
/// A stutter is a non-trivial line (more than 3 characters after
/// trimming) that reappears within `window` lines with only blank or
/// whitespace lines in between. The earlier copy and every intervening
/// blank alias to the later copy.
pub fn stutter_targets(keys: &[String], window: usize) -> Vec<usize> {
    let n = keys.len();
    let mut target: Vec<usize> = (0..n).collect();

    for start in 0..n {
        if target[start] != start {
            continue;
        }
        let key = keys[start].trim();
        if key.chars().count() <= 3 {
            continue;
        }
        let end = (start + window + 1).min(n);
        for candidate in (start + 1)..end {
            let between_is_blank = (start + 1..candidate).all(|k| keys[k].trim().is_empty());
            if between_is_blank && keys[candidate].trim() == key {
                for k in start..candidate {
                    target[k] = candidate;
                }
                break;
            }
        }
    }

    for i in 0..n {
        let mut t = target[i];
        let mut guard = 0;
        while target[t] != t && guard < n {
            t = target[t];
            guard += 1;
        }
        target[i] = t;
    }

    target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn collapses_stutter_with_blank_gap() {
        let k = keys(&["loading assistant reply", "", "loading assistant reply"]);
        let target = stutter_targets(&k, 5);
        assert_eq!(target, vec![2, 2, 2]);
    }

    #[test]
    fn leaves_distinct_lines_alone() {
        let k = keys(&["one two three four", "five six seven"]);
        let target = stutter_targets(&k, 5);
        assert_eq!(target, vec![0, 1]);
    }

    #[test]
    fn trivial_short_lines_never_stutter() {
        let k = keys(&["$", "", "$"]);
        let target = stutter_targets(&k, 5);
        assert_eq!(target, vec![0, 1, 2]);
    }

    #[test]
    fn match_outside_window_is_not_a_stutter() {
        let mut strs = vec!["repeated content here".to_string()];
        strs.extend((0..6).map(|_| String::new()));
        strs.push("repeated content here".to_string());
        let target = stutter_targets(&strs, 5);
        assert_eq!(target[0], 0);
    }
}
