use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Winkler prefix bonus: up to this many shared leading characters count.
const PREFIX_CAP: usize = 4;
/// Winkler bonus coefficient per shared prefix character.
const PREFIX_SCALE: f64 = 0.1;

/// Normalize a free-text description for comparison.
///
/// Lowercases, strips diacritics (NFD with combining marks removed), maps
/// every non-alphanumeric character to a space, then collapses whitespace
/// runs and trims. "PAGAMENTO PIX JOÃO" and "pagamento  pix, joao"
/// normalize to the same string.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Jaro-Winkler similarity in [0, 1].
///
/// Classic Jaro with a matching window of `floor(max(len) / 2) - 1` and
/// transposition halving, plus the Winkler bonus of `0.1 × (1 − jaro)` per
/// shared leading character, capped at 4 characters. Downstream score
/// thresholds were tuned against exactly this formula; the `strsim` crate
/// is not a drop-in substitute because it does not cap the shared prefix.
///
/// Both strings empty yields 1.0; exactly one empty yields 0.0. Inputs are
/// compared as-is; pass them through [`normalize`] first.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let jaro = jaro(&a, &b);
    let prefix = a
        .iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .take(PREFIX_CAP)
        .count();

    (jaro + prefix as f64 * PREFIX_SCALE * (1.0 - jaro)).min(1.0)
}

fn jaro(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut b_taken = vec![false; b.len()];
    let mut a_hits: Vec<char> = Vec::new();

    for (i, &ca) in a.iter().enumerate() {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(b.len());
        for j in lo..hi {
            if !b_taken[j] && b[j] == ca {
                b_taken[j] = true;
                a_hits.push(ca);
                break;
            }
        }
    }

    if a_hits.is_empty() {
        return 0.0;
    }

    let b_hits: Vec<char> = b
        .iter()
        .zip(&b_taken)
        .filter(|&(_, &taken)| taken)
        .map(|(&c, _)| c)
        .collect();
    let transpositions = a_hits.iter().zip(&b_hits).filter(|(x, y)| x != y).count() / 2;

    let m = a_hits.len() as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - transpositions as f64) / m) / 3.0
}
