use super::*;

fn anchor(p: &DrawPrimitive) -> Point {
    match *p {
        DrawPrimitive::Heart { origin, .. } => origin,
        DrawPrimitive::Star { center, .. } | DrawPrimitive::Flower { center, .. } => center,
        DrawPrimitive::Band { rect, .. } => rect.origin(),
    }
}

#[test]
fn tiled_styles_are_pure_functions_of_their_inputs() {
    for style in [BorderStyle::Hearts, BorderStyle::Stars, BorderStyle::Flowers] {
        let a: Vec<_> = generate(style, 800, 600, 40).collect();
        let b: Vec<_> = generate(style, 800, 600, 40).collect();
        assert!(!a.is_empty());
        assert_eq!(a, b, "{style} must regenerate identically");
    }
}

#[test]
fn tiled_counts_follow_spacing() {
    // hearts/flowers: 32 steps across 800, 24 down 600; each step stamps two edges.
    assert_eq!(generate(BorderStyle::Hearts, 800, 600, 40).len(), 2 * (32 + 24));
    assert_eq!(generate(BorderStyle::Flowers, 800, 600, 40).count(), 2 * (32 + 24));
    // stars: spacing 30 gives 27 across and 20 down.
    assert_eq!(generate(BorderStyle::Stars, 800, 600, 40).count(), 2 * (27 + 20));
}

#[test]
fn hearts_start_on_fixed_offsets_and_alternate_edges() {
    let hearts: Vec<_> = generate(BorderStyle::Hearts, 800, 600, 40).collect();
    assert_eq!(anchor(&hearts[0]), Point::new(10.0, 15.0));
    assert_eq!(anchor(&hearts[1]), Point::new(10.0, 575.0));
    assert_eq!(anchor(&hearts[2]), Point::new(35.0, 15.0));

    let vertical_start = 2 * 32;
    assert_eq!(anchor(&hearts[vertical_start]), Point::new(15.0, 10.0));
    assert_eq!(anchor(&hearts[vertical_start + 1]), Point::new(775.0, 10.0));
    assert_eq!(anchor(hearts.last().unwrap()), Point::new(775.0, 23.0 * 25.0 + 10.0));

    assert!(hearts.iter().all(|h| matches!(
        h,
        DrawPrimitive::Heart { size, color, .. } if *size == 12.0 && *color == HEART_PINK
    )));
}

#[test]
fn corners_are_stamped_by_both_passes() {
    let stars: Vec<_> = generate(BorderStyle::Stars, 800, 600, 40).collect();
    let top_left_horizontal = anchor(&stars[0]);
    let top_left_vertical = anchor(&stars[2 * 27]);
    assert_eq!(top_left_horizontal, Point::new(15.0, 15.0));
    assert_eq!(top_left_vertical, Point::new(15.0, 15.0));
}

#[test]
fn flowers_carry_petal_and_center_colors() {
    let first = generate(BorderStyle::Flowers, 800, 600, 40).next().unwrap();
    assert_eq!(
        first,
        DrawPrimitive::Flower {
            center: Point::new(15.0, 15.0),
            size: 8.0,
            petal: FLOWER_PURPLE,
            center_color: FLOWER_CENTER,
        }
    );
}

#[test]
fn rainbow_is_28_bands_of_inset_over_seven() {
    let bands: Vec<_> = generate(BorderStyle::Rainbow, 800, 600, 40).collect();
    assert_eq!(bands.len(), 28);

    let stripe = 40.0 / 7.0;
    for (edge_kind, expected) in [
        (BandEdge::Top, 7),
        (BandEdge::Bottom, 7),
        (BandEdge::Left, 7),
        (BandEdge::Right, 7),
    ] {
        let n = bands
            .iter()
            .filter(|b| matches!(b, DrawPrimitive::Band { edge, .. } if *edge == edge_kind))
            .count();
        assert_eq!(n, expected);
    }

    for b in &bands {
        let DrawPrimitive::Band { edge, rect, .. } = b else {
            panic!("rainbow must only emit bands");
        };
        let thickness = match edge {
            BandEdge::Top | BandEdge::Bottom => rect.height(),
            BandEdge::Left | BandEdge::Right => rect.width(),
        };
        assert!((thickness - stripe).abs() < 1e-9);
    }
}

#[test]
fn rainbow_bands_step_inward_color_by_color() {
    let bands: Vec<_> = generate(BorderStyle::Rainbow, 800, 600, 40).collect();
    let stripe = 40.0 / 7.0;

    let DrawPrimitive::Band { rect, color, .. } = bands[0] else {
        unreachable!()
    };
    assert_eq!(rect, Rect::new(0.0, 0.0, 800.0, stripe));
    assert_eq!(color, RAINBOW[0]);

    // Second color, bottom edge.
    let DrawPrimitive::Band { edge, rect, color } = bands[5] else {
        unreachable!()
    };
    assert_eq!(edge, BandEdge::Bottom);
    assert_eq!(color, RAINBOW[1]);
    assert!((rect.y0 - (560.0 + stripe)).abs() < 1e-9);

    // Last color, right edge ends flush with the canvas.
    let DrawPrimitive::Band { edge, rect, color } = bands[27] else {
        unreachable!()
    };
    assert_eq!(edge, BandEdge::Right);
    assert_eq!(color, RAINBOW[6]);
    assert!((rect.x1 - 800.0).abs() < 1e-9);
}

#[test]
fn none_and_unknown_ids_draw_nothing() {
    assert_eq!(generate(BorderStyle::None, 800, 600, 40).count(), 0);
    assert_eq!(generate_border("glitter", 800, 600, 40).count(), 0);
    assert_eq!(generate_border("Hearts", 800, 600, 40).count(), 112);
}

#[test]
fn generation_is_lazy_and_clone_forks_the_cursor() {
    let mut it = generate(BorderStyle::Hearts, 800, 600, 40);
    let first = it.next().unwrap();
    let fork = it.clone();
    assert_eq!(it.len(), 111);
    assert_eq!(fork.collect::<Vec<_>>(), it.collect::<Vec<_>>());

    let restarted = generate(BorderStyle::Hearts, 800, 600, 40).next().unwrap();
    assert_eq!(first, restarted);
}

#[test]
fn degenerate_canvas_yields_no_motifs() {
    assert_eq!(generate(BorderStyle::Stars, 0, 0, 40).count(), 0);
}

#[test]
fn parse_round_trips_ids() {
    for style in BorderStyle::ALL {
        assert_eq!(BorderStyle::parse(style.id()), style);
    }
    assert_eq!(BorderStyle::Rainbow.to_string(), "rainbow");
}
