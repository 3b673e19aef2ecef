/// Levenshtein distance between two strings, ignoring case.
///
/// Both operands are upper-cased one character at a time, then compared
/// with a single cost row. Characters whose upper case is longer than one
/// character (`ß`, `ﬁ`) are kept as they are, so lengths never change.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a = upper_chars(a);
    let b = upper_chars(b);

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut costs: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        costs[0] = i + 1;
        let mut corner = i;

        for (j, cb) in b.iter().enumerate() {
            let upper = costs[j + 1];
            costs[j + 1] = if ca == cb {
                corner
            } else {
                upper.min(corner).min(costs[j]) + 1
            };
            corner = upper;
        }
    }

    costs[b.len()]
}

fn upper_chars(s: &str) -> Vec<char> {
    s.chars().map(upper_char).collect()
}

fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
