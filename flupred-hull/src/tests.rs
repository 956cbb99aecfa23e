use crate::{convex_hull, HullError, Point, Polygon};
use color_eyre::eyre::{Report, Result};

fn points(coords: &[(f64, f64)]) -> Vec<Point<f64>> {
    coords.iter().copied().map(Point::from).collect()
}

#[test]
fn hull_vertices_are_input_points() -> Result<(), Report> {
    let input = points(&[
        (0.5, 0.5),
        (0.0, 0.0),
        (4.0, 1.0),
        (3.0, 3.0),
        (1.0, 4.0),
        (2.0, 2.0),
        (-1.0, 2.0),
        (1.5, 0.2),
    ]);
    let hull = convex_hull(&input)?;

    assert!(hull.is_closed());
    assert!(hull.vertices().iter().all(|v| input.contains(v)));
    assert_eq!(hull.len(), 6);
    // counter-clockwise
    assert!(hull.signed_area() > 0.0);
    Ok(())
}

#[test]
fn hull_starts_at_lowest_x() -> Result<(), Report> {
    let input = points(&[(5.0, 5.0), (2.0, 9.0), (-3.0, 1.0), (0.0, -2.0), (-3.0, 4.0)]);
    let hull = convex_hull(&input)?;
    assert_eq!(hull.vertices()[0], Point::new(-3.0, 1.0));
    assert_eq!(hull.vertices().last(), Some(&Point::new(-3.0, 1.0)));
    Ok(())
}

#[test]
fn hull_excludes_edge_and_interior_points() -> Result<(), Report> {
    let input = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (1.0, 1.0), (0.0, 2.0)]);
    let hull = convex_hull(&input)?;
    let expected = Polygon::close(points(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]));
    assert_eq!(hull, expected);
    Ok(())
}

#[test]
fn hull_ignores_duplicates_and_non_finite() -> Result<(), Report> {
    let input = points(&[
        (0.0, 0.0),
        (0.0, 0.0),
        (1.0, 0.0),
        (f64::NAN, 3.0),
        (0.0, 1.0),
        (f64::INFINITY, 0.0),
        (1.0, 0.0),
    ]);
    let hull = convex_hull(&input)?;
    assert_eq!(hull.len(), 3);
    Ok(())
}

#[test]
fn hull_too_few_points() {
    let input = points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (0.0, 0.0)]);
    assert_eq!(convex_hull(&input), Err(HullError::TooFewPoints { distinct: 2 }));
    assert_eq!(convex_hull::<f64>(&[]), Err(HullError::TooFewPoints { distinct: 0 }));
}

#[test]
fn hull_collinear() {
    let input: Vec<_> = (0..10).map(|i| Point::new(i as f64, 2.0 * i as f64 + 1.0)).collect();
    assert_eq!(convex_hull(&input), Err(HullError::Collinear { distinct: 10 }));
}

#[test]
fn polygon_serializes_vertices() -> Result<(), Report> {
    let polygon = Polygon::close(points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]));
    let json = serde_json::to_string(&polygon)?;
    assert_eq!(json, r#"{"vertices":[{"x":0.0,"y":0.0},{"x":1.0,"y":0.0},{"x":0.0,"y":1.0},{"x":0.0,"y":0.0}]}"#);
    Ok(())
}
