//! Conversion from decoded protobuf messages into a [`SceneDocument`].

use std::collections::BTreeMap;

use crate::{
    format::schema::{self, ShapeType, shape_entity},
    foundation::core::{Affine, Canvas, Fps, Point, Rect, Rgba, affine_from_parts},
    foundation::error::{SvgaError, SvgaResult},
    scene::model::{
        AssetIssue, AudioClip, ImageAsset, LineCap, LineJoin, SceneDocument, Shape, ShapeKind,
        ShapeStyle, Sprite, SpriteFrame,
    },
};

/// Assemble a scene from a decoded movie and its already transcoded images.
pub fn build_scene(
    movie: schema::MovieEntity,
    images: BTreeMap<String, ImageAsset>,
    asset_issues: Vec<AssetIssue>,
) -> SvgaResult<SceneDocument> {
    let params = movie
        .params
        .ok_or_else(|| SvgaError::corrupt("movie params missing"))?;
    if params.frames < 1 {
        return Err(SvgaError::corrupt(format!(
            "movie must have at least one frame, got {}",
            params.frames
        )));
    }
    if params.fps <= 0 {
        return Err(SvgaError::corrupt(format!(
            "movie fps must be positive, got {}",
            params.fps
        )));
    }
    let fps = Fps::new(params.fps as u32)?;

    let sprites = movie.sprites.into_iter().map(build_sprite).collect();
    let audios = movie
        .audios
        .into_iter()
        .map(|a| AudioClip {
            key: a.audio_key,
            start_frame: non_negative(a.start_frame),
            end_frame: non_negative(a.end_frame),
            start_time_ms: non_negative(a.start_time),
            total_time_ms: non_negative(a.total_time),
        })
        .collect();

    Ok(SceneDocument {
        version: movie.version,
        fps,
        frame_count: params.frames as u32,
        canvas: Canvas {
            width: f64::from(params.view_box_width),
            height: f64::from(params.view_box_height),
        },
        sprites,
        images,
        audios,
        asset_issues,
    })
}

fn build_sprite(sprite: schema::SpriteEntity) -> Sprite {
    let mut frames = Vec::with_capacity(sprite.frames.len());
    let mut previous: Vec<Shape> = Vec::new();

    for frame in sprite.frames {
        let keeps_previous = frame
            .shapes
            .first()
            .is_some_and(|s| matches!(ShapeType::try_from(s.shape_type), Ok(ShapeType::Keep)));
        let shapes = if keeps_previous {
            previous.clone()
        } else {
            frame.shapes.iter().filter_map(build_shape).collect()
        };
        previous.clone_from(&shapes);

        let layout = frame.layout.map(layout_rect).unwrap_or(Rect::ZERO);
        let transform = frame.transform.as_ref().map(to_affine).unwrap_or(Affine::IDENTITY);
        frames.push(SpriteFrame {
            alpha: f64::from(frame.alpha),
            layout,
            transform,
            bounds: transform.transform_rect_bbox(layout),
            clip_path: non_empty(frame.clip_path),
            shapes,
        });
    }

    Sprite {
        image_key: sprite.image_key,
        matte_key: non_empty(sprite.matte_key),
        frames,
    }
}

fn build_shape(shape: &schema::ShapeEntity) -> Option<Shape> {
    let kind = match shape.args.as_ref()? {
        shape_entity::Args::Shape(a) => ShapeKind::Path { d: a.d.clone() },
        shape_entity::Args::Rect(r) => ShapeKind::Rect {
            rect: Rect::new(
                f64::from(r.x),
                f64::from(r.y),
                f64::from(r.x + r.width),
                f64::from(r.y + r.height),
            ),
            corner_radius: f64::from(r.corner_radius),
        },
        shape_entity::Args::Ellipse(e) => ShapeKind::Ellipse {
            center: Point::new(f64::from(e.x), f64::from(e.y)),
            radius_x: f64::from(e.radius_x),
            radius_y: f64::from(e.radius_y),
        },
    };
    Some(Shape {
        kind,
        style: shape.styles.as_ref().map(build_style),
        transform: shape.transform.as_ref().map(to_affine).unwrap_or(Affine::IDENTITY),
    })
}

fn build_style(style: &schema::ShapeStyle) -> ShapeStyle {
    let line_cap = match schema::LineCap::try_from(style.line_cap) {
        Ok(schema::LineCap::Round) => LineCap::Round,
        Ok(schema::LineCap::Square) => LineCap::Square,
        _ => LineCap::Butt,
    };
    let line_join = match schema::LineJoin::try_from(style.line_join) {
        Ok(schema::LineJoin::Round) => LineJoin::Round,
        Ok(schema::LineJoin::Bevel) => LineJoin::Bevel,
        _ => LineJoin::Miter,
    };
    ShapeStyle {
        fill: style.fill.as_ref().map(to_rgba),
        stroke: style.stroke.as_ref().map(to_rgba),
        stroke_width: f64::from(style.stroke_width),
        line_cap,
        line_join,
        miter_limit: f64::from(style.miter_limit),
        dash: [
            f64::from(style.line_dash_i),
            f64::from(style.line_dash_ii),
            f64::from(style.line_dash_iii),
        ],
    }
}

fn to_affine(t: &schema::Transform) -> Affine {
    affine_from_parts(t.a, t.b, t.c, t.d, t.tx, t.ty)
}

fn to_rgba(c: &schema::RgbaColor) -> Rgba {
    Rgba {
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.a,
    }
}

fn layout_rect(l: schema::Layout) -> Rect {
    Rect::new(
        f64::from(l.x),
        f64::from(l.y),
        f64::from(l.x + l.width),
        f64::from(l.y + l.height),
    )
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn non_negative(v: i32) -> u32 {
    v.max(0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/scene/build.rs"]
mod tests;
