//! CPU rasterization of a genome with tiny-skia.
//!
//! The canvas starts as a solid background and each gene is composited over
//! it in genome order ("source over"), so later genes paint over earlier ones.

use image::RgbaImage;
use tiny_skia as sk;

use crate::error::{EvoError, Result};
use crate::genome::{Color, Extent, Gene, Polygon, Rectangle};

/// Renders `genes` onto a `extent`-sized canvas filled with `background`.
///
/// `anti_alias` only affects polygons; rectangle edges always land on pixel
/// boundaries. Pixels no gene touched come back as exactly `background`,
/// even when it is translucent and would not survive tiny-skia's
/// premultiplied storage unchanged.
pub fn render_genes(
    extent: Extent,
    background: Color,
    genes: &[Gene],
    anti_alias: bool,
) -> Result<RgbaImage> {
    let mut pix = sk::Pixmap::new(extent.width, extent.height).ok_or_else(|| {
        EvoError::Render(format!(
            "cannot allocate a {}x{} canvas",
            extent.width, extent.height
        ))
    })?;
    pix.fill(sk::Color::from_rgba8(
        background.r,
        background.g,
        background.b,
        background.a,
    ));
    let untouched = pix.pixels().first().copied();

    for gene in genes {
        match gene {
            Gene::Polygon(poly) => draw_polygon(&mut pix, poly, anti_alias),
            Gene::Rectangle(rect) => draw_rectangle(&mut pix, rect),
        }
    }

    to_straight_rgba(&pix, untouched.map(|px| (px, background)))
}

fn paint_for(color: Color, anti_alias: bool) -> sk::Paint<'static> {
    let mut paint = sk::Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = anti_alias;
    paint
}

fn draw_polygon(pix: &mut sk::Pixmap, poly: &Polygon, anti_alias: bool) {
    if poly.color.a == 0 {
        return;
    }
    let Some((first, rest)) = poly.vertices.split_first() else {
        return;
    };

    let mut pb = sk::PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for v in rest {
        pb.line_to(v.x as f32, v.y as f32);
    }
    pb.close();

    // Fully collinear or coincident vertices produce no path.
    let Some(path) = pb.finish() else {
        return;
    };

    let paint = paint_for(poly.color, anti_alias);
    pix.fill_path(
        &path,
        &paint,
        sk::FillRule::Winding,
        sk::Transform::identity(),
        None,
    );

    let stroke = sk::Stroke {
        width: 1.0,
        ..sk::Stroke::default()
    };
    pix.stroke_path(&path, &paint, &stroke, sk::Transform::identity(), None);
}

fn draw_rectangle(pix: &mut sk::Pixmap, rect: &Rectangle) {
    if rect.color.a == 0 || rect.bounds.width() == 0 || rect.bounds.height() == 0 {
        return;
    }
    let [x1, y1, x2, y2] = rect.bounds.coordinates();
    let Some(r) = sk::Rect::from_ltrb(x1 as f32, y1 as f32, x2 as f32, y2 as f32) else {
        return;
    };

    let paint = paint_for(rect.color, false);
    pix.fill_rect(r, &paint, sk::Transform::identity(), None);
}

/// tiny-skia stores premultiplied pixels; the target is straight RGBA.
///
/// `background` pairs the stored background pixel with the straight color it
/// was filled from, so untouched pixels skip the lossy demultiply.
fn to_straight_rgba(
    pix: &sk::Pixmap,
    background: Option<(sk::PremultipliedColorU8, Color)>,
) -> Result<RgbaImage> {
    let mut raw = Vec::with_capacity(pix.pixels().len() * 4);
    for px in pix.pixels() {
        match background {
            Some((stored, color)) if *px == stored => raw.extend_from_slice(&color.channels()),
            _ => {
                let c = px.demultiply();
                raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
            }
        }
    }
    RgbaImage::from_raw(pix.width(), pix.height(), raw)
        .ok_or_else(|| EvoError::Render("canvas buffer has the wrong size".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::Point;

    const WHITE: Color = Color::opaque(255, 255, 255);
    const RED: Color = Color::opaque(255, 0, 0);
    const BLUE: Color = Color::opaque(0, 0, 255);

    #[test]
    fn test_background_only() {
        let img = render_genes(Extent::new(3, 2), RED, &[], true).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert!(img.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }

    #[test]
    fn test_translucent_background_is_exact() {
        let bg = Color::new(200, 17, 3, 37);
        let img = render_genes(Extent::new(5, 4), bg, &[], true).unwrap();
        assert!(img.pixels().all(|p| p.0 == [200, 17, 3, 37]));

        // a transparent gene leaves the background alone
        let gene = Gene::rectangle(Point::new(0, 0), Point::new(5, 4), Color::new(9, 9, 9, 0));
        let img = render_genes(Extent::new(5, 4), bg, &[gene], false).unwrap();
        assert!(img.pixels().all(|p| p.0 == [200, 17, 3, 37]));
    }

    #[test]
    fn test_full_rectangle_covers_canvas() {
        let gene = Gene::rectangle(Point::new(0, 0), Point::new(4, 4), BLUE);
        let img = render_genes(Extent::new(4, 4), WHITE, &[gene], false).unwrap();
        assert!(img.pixels().all(|p| p.0 == [0, 0, 255, 255]));
    }

    #[test]
    fn test_later_gene_paints_over() {
        let a = Gene::rectangle(Point::new(0, 0), Point::new(3, 3), RED);
        let b = Gene::rectangle(Point::new(1, 1), Point::new(4, 4), BLUE);

        let ab = render_genes(Extent::new(4, 4), WHITE, &[a.clone(), b.clone()], false).unwrap();
        assert_eq!(ab.get_pixel(2, 2).0, [0, 0, 255, 255]);
        assert_eq!(ab.get_pixel(0, 0).0, [255, 0, 0, 255]);

        let ba = render_genes(Extent::new(4, 4), WHITE, &[b, a], false).unwrap();
        assert_eq!(ba.get_pixel(2, 2).0, [255, 0, 0, 255]);
        assert_eq!(ba.get_pixel(3, 3).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_transparent_gene_is_invisible() {
        let gene = Gene::polygon(
            vec![Point::new(0, 0), Point::new(8, 0), Point::new(0, 8)],
            Color::new(0, 255, 0, 0),
        );
        let img = render_genes(Extent::new(8, 8), WHITE, &[gene], true).unwrap();
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_polygon_fills_interior() {
        let gene = Gene::polygon(
            vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10), Point::new(0, 10)],
            BLUE,
        );
        let img = render_genes(Extent::new(10, 10), WHITE, &[gene], false).unwrap();
        assert_eq!(img.get_pixel(5, 5).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_degenerate_polygon_is_skipped() {
        let gene = Gene::polygon(vec![Point::new(2, 2); 3], BLUE);
        let img = render_genes(Extent::new(4, 4), WHITE, &[gene], true).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }
}
