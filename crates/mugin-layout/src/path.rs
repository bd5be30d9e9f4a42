//! SVG path data for links.
//!
//! Numbers are printed the d3-path way: rounded half-up to three fractional digits, trailing
//! zeros dropped.

use crate::link_geom::{EdgeKind, LinkGeometry};
use std::fmt::Write as _;

/// `M x0,y0 L x1,y1`.
pub fn pathline(geom: &LinkGeometry) -> String {
    let mut out = String::with_capacity(48);
    out.push('M');
    push_pair(&mut out, geom.x0, geom.y0);
    out.push('L');
    push_pair(&mut out, geom.x1, geom.y1);
    out
}

/// A circular arc of radius `dr`, small-arc, positive sweep.
pub fn patharc(geom: &LinkGeometry) -> String {
    let mut out = String::with_capacity(64);
    out.push('M');
    push_pair(&mut out, geom.x0, geom.y0);
    out.push('A');
    push_pair(&mut out, geom.dr, geom.dr);
    out.push_str(" 0 0,1 ");
    push_pair(&mut out, geom.x1, geom.y1);
    out
}

pub fn edge_path(geom: &LinkGeometry, kind: EdgeKind) -> String {
    match kind {
        EdgeKind::Line => pathline(geom),
        EdgeKind::Arc => patharc(geom),
    }
}

fn push_pair(out: &mut String, x: f64, y: f64) {
    fmt_path_into(out, x);
    out.push(',');
    fmt_path_into(out, y);
}

pub fn fmt_path(v: f64) -> String {
    let mut out = String::new();
    fmt_path_into(&mut out, v);
    out
}

pub fn fmt_path_into(out: &mut String, v: f64) {
    if !v.is_finite() || v.abs() < 0.0005 {
        out.push('0');
        return;
    }

    let k = (v * 1000.0 + 0.5).floor() as i64;
    if k == 0 {
        out.push('0');
        return;
    }
    append_fixed_3dp_trimmed(out, k);
}

fn append_fixed_3dp_trimmed(out: &mut String, k: i64) {
    if k < 0 {
        out.push('-');
    }
    let abs = k.unsigned_abs();
    let _ = write!(out, "{}", abs / 1000);

    let frac = abs % 1000;
    if frac == 0 {
        return;
    }
    let digits = format!("{frac:03}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}
