//! Hand-authored tutorial levels, played before random puzzles start.

use std::f64::consts::{FRAC_PI_2, TAU};

use chipfire_graph::{LevelNode, Vec2};

/// Number of tutorial levels.
pub const TUTORIAL_COUNT: usize = 4;

/// Vertices of a regular polygon centered on the origin, first one on top.
fn polygon(points: usize, radius: f64) -> Vec<Vec2> {
    (0..points)
        .map(|i| {
            let angle = TAU * i as f64 / points as f64 - FRAC_PI_2;
            Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Tutorial level by index, or `None` once the tutorials are exhausted.
pub fn tutorial(index: usize) -> Option<Vec<LevelNode>> {
    let level = match index {
        // One fire wins.
        0 => vec![
            LevelNode::new((-100.0, 0.0), &[1], 1),
            LevelNode::new((100.0, 0.0), &[0], -1),
        ],
        // Both ends must give.
        1 => vec![
            LevelNode::new((-300.0, 0.0), &[1], 2),
            LevelNode::new((0.0, 0.0), &[0, 2], -4),
            LevelNode::new((300.0, 0.0), &[1], 2),
        ],
        2 => {
            let at = polygon(3, 200.0);
            vec![
                LevelNode::new(at[0], &[1, 2], 3),
                LevelNode::new(at[1], &[0, 2], -2),
                LevelNode::new(at[2], &[0, 1], 1),
            ]
        }
        // A ring where the debt sits opposite the reserve.
        3 => {
            let values = [5, 1, 1, 1, -2, 1, 1, 1];
            polygon(values.len(), 200.0)
                .into_iter()
                .zip(values)
                .enumerate()
                .map(|(i, (position, value))| {
                    let links: Vec<usize> = match i {
                        0 => vec![],
                        7 => vec![6, 0],
                        _ => vec![i - 1],
                    };
                    LevelNode::new(position, &links, value)
                })
                .collect()
        }
        _ => return None,
    };
    Some(level)
}

/// Whether `index` names a tutorial level.
pub fn is_tutorial(index: usize) -> bool {
    index < TUTORIAL_COUNT
}
