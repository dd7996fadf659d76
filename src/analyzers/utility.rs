/// Renders `value` with exactly three decimals.
///
/// Rounds the exact binary value to nearest; an exact tie goes away from
/// zero (`0.0625` is `"0.063"`, `-0.0625` is `"-0.063"`).
pub fn fixed3(value: f64) -> String {
    match exact_tie_thousandths(value) {
        Some(thousandths) => render_thousandths(thousandths),
        None => format!("{value:.3}"),
    }
}

/// A value sits exactly halfway between two thousandths iff it is an odd
/// multiple of 1/16: `m/16 * 1000 = m * 62.5`. Returns the thousandths count
/// rounded away from zero for such values.
fn exact_tie_thousandths(value: f64) -> Option<i128> {
    let sixteenths = value * 16.0;
    if !sixteenths.is_finite() || sixteenths.fract() != 0.0 || sixteenths.abs() >= 1e30 {
        return None;
    }

    let m = sixteenths as i128;
    if m % 2 == 0 {
        return None;
    }

    let doubled = m * 125;
    Some((doubled + doubled.signum()) / 2)
}

fn render_thousandths(thousandths: i128) -> String {
    let sign = if thousandths < 0 { "-" } else { "" };
    let abs = thousandths.unsigned_abs();
    format!("{sign}{}.{:03}", abs / 1000, abs % 1000)
}
