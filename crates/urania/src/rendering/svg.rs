use crate::rendering::primitives::{Color, Shape, TextAnchor, TextRole};
use crate::rendering::spec::ChartSpec;
use std::fmt::Write;

/// Serialize a chart spec as a standalone SVG document.
pub fn to_svg(spec: &ChartSpec) -> String {
    let mut out = String::with_capacity(spec.shapes.len() * 96);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = spec.width,
        h = spec.height
    );
    let _ = writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"{}/>"#,
        spec.background_color.to_hex(),
        opacity_attr("fill-opacity", spec.background_color)
    );

    for shape in &spec.shapes {
        write_shape(&mut out, shape);
    }

    out.push_str("</svg>\n");
    out
}

fn write_shape(out: &mut String, shape: &Shape) {
    let _ = match shape {
        Shape::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            let fill_attr = fill
                .map(|c| format!(r#"fill="{}"{}"#, c.to_hex(), opacity_attr("fill-opacity", c)))
                .unwrap_or_else(|| r#"fill="none""#.to_string());
            let stroke_attr = stroke
                .map(|s| {
                    format!(
                        r#" stroke="{}" stroke-width="{}"{}"#,
                        s.color.to_hex(),
                        s.width,
                        opacity_attr("stroke-opacity", s.color)
                    )
                })
                .unwrap_or_default();
            writeln!(
                out,
                r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" {}{}/>"#,
                center.x, center.y, radius, fill_attr, stroke_attr
            )
        }
        Shape::Line { from, to, stroke } => writeln!(
            out,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            stroke.color.to_hex(),
            stroke.width
        ),
        Shape::Text {
            position,
            content,
            role,
            font_family,
            size,
            color,
            anchor,
        } => writeln!(
            out,
            r#"<text class="{}" x="{:.2}" y="{:.2}" font-family="{}" font-size="{}" fill="{}" text-anchor="{}" dominant-baseline="central">{}</text>"#,
            role_class(*role),
            position.x,
            position.y,
            escape(font_family),
            size,
            color.to_hex(),
            anchor_attr(*anchor),
            escape(content)
        ),
        Shape::AspectLine {
            from,
            to,
            aspect_type,
            color,
            width,
        } => writeln!(
            out,
            r#"<line class="aspect aspect-{}" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            aspect_type.name().to_lowercase(),
            from.x,
            from.y,
            to.x,
            to.y,
            color.to_hex(),
            width
        ),
    };
}

fn role_class(role: TextRole) -> &'static str {
    match role {
        TextRole::SignGlyph => "sign-glyph",
        TextRole::HouseNumber => "house-number",
        TextRole::BodyGlyph => "body-glyph",
        TextRole::DegreeLabel => "degree-label",
    }
}

fn anchor_attr(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.a == 255 {
        String::new()
    } else {
        format!(r#" {}="{:.3}""#, name, color.opacity())
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_empty_spec_is_valid_document() {
        let svg = to_svg(&ChartSpec::new(100.0, 50.0));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
