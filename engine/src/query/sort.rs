// Ordering of a filtered view. Stable: equal keys keep their prior order.
use shared::models::{SortDirection, SortKey, SortKind, Unit};
use std::cmp::Ordering;

pub fn sort(view: &mut [&Unit], key: SortKey, direction: SortDirection) {
    view.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

pub fn compare(a: &Unit, b: &Unit, key: SortKey) -> Ordering {
    match key.kind() {
        SortKind::MonetaryTotal => {
            let total = |u: &Unit| key.monetary(u).map_or(0.0, |m| m.total);
            total(a).partial_cmp(&total(b)).unwrap_or(Ordering::Equal)
        }
        SortKind::NumericCode => leading_int(key.text(a)).cmp(&leading_int(key.text(b))),
        SortKind::Text => text_order(key.text(a), key.text(b)),
    }
}

/// Integer at the start of `s` ("0026" -> 26, "12-A" -> 12); 0 when there is none.
pub fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    if negative {
        -value
    } else {
        value
    }
}

/// Case-insensitive comparison that ranks accented letters with their base
/// letter first ("Água" sorts next to "agua"), then by exact lower-case text.
pub fn text_order(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    fold_accents(&a).cmp(&fold_accents(&b)).then_with(|| a.cmp(&b))
}

fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{MonetaryBreakdown, Project};

    fn unit(sequence_index: usize) -> Unit {
        Unit { sequence_index, ..Default::default() }
    }

    fn with_available(sequence_index: usize, total: f64) -> Unit {
        Unit {
            available_balance: MonetaryBreakdown { total, ..Default::default() },
            ..unit(sequence_index)
        }
    }

    fn indexes(view: &[&Unit]) -> Vec<usize> {
        view.iter().map(|u| u.sequence_index).collect()
    }

    #[test]
    fn test_monetary_descending() {
        let units = vec![with_available(0, 100.0), with_available(1, -50.0), with_available(2, 0.0)];
        let mut view: Vec<&Unit> = units.iter().collect();
        sort(&mut view, SortKey::AvailableBalance, SortDirection::Descending);
        let totals: Vec<f64> = view.iter().map(|u| u.available_balance.total).collect();
        assert_eq!(totals, vec![100.0, 0.0, -50.0]);
    }

    #[test]
    fn test_monetary_compares_total_not_parts() {
        let mut a = with_available(0, 10.0);
        a.available_balance.capital = 1000.0;
        let b = with_available(1, 20.0);
        assert_eq!(compare(&a, &b, SortKey::AvailableBalance), Ordering::Less);
    }

    #[test]
    fn test_numeric_codes_compare_as_integers() {
        let units: Vec<Unit> = ["10", "9", "abc", "2"]
            .iter()
            .enumerate()
            .map(|(i, nte)| Unit { nte: nte.to_string(), ..unit(i) })
            .collect();
        let mut view: Vec<&Unit> = units.iter().collect();
        sort(&mut view, SortKey::Nte, SortDirection::Ascending);
        assert_eq!(indexes(&view), vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("0026"), 26);
        assert_eq!(leading_int(" 12-A"), 12);
        assert_eq!(leading_int("-7"), -7);
        assert_eq!(leading_int("NTE 3"), 0);
        assert_eq!(leading_int(""), 0);
    }

    #[test]
    fn test_text_order_ignores_case_and_accents() {
        assert_eq!(text_order("Água Fria", "alagoinhas"), Ordering::Less);
        assert_eq!(text_order("salvador", "SALVADOR"), Ordering::Equal);
        assert_eq!(text_order("Itabuna", "Ilhéus"), Ordering::Greater);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let units: Vec<Unit> = ["Salvador", "Feira", "salvador", "Feira"]
            .iter()
            .enumerate()
            .map(|(i, m)| Unit { municipality: m.to_string(), ..unit(i) })
            .collect();

        let mut asc: Vec<&Unit> = units.iter().collect();
        sort(&mut asc, SortKey::Municipality, SortDirection::Ascending);
        assert_eq!(indexes(&asc), vec![1, 3, 0, 2]);

        let mut desc: Vec<&Unit> = units.iter().collect();
        sort(&mut desc, SortKey::Municipality, SortDirection::Descending);
        assert_eq!(indexes(&desc), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_sort_by_project_status() {
        let units: Vec<Unit> = ["NÃO", "implantado", ""]
            .iter()
            .enumerate()
            .map(|(i, s)| Unit { lab_robotica: s.to_string(), ..unit(i) })
            .collect();
        let mut view: Vec<&Unit> = units.iter().collect();
        sort(&mut view, SortKey::Project(Project::LabRobotica), SortDirection::Ascending);
        assert_eq!(indexes(&view), vec![2, 1, 0]);
    }
}
