//! Combat dice interpretation
//!
//! Each d6 face maps to a damage value and an effect flag:
//!
//! | face | damage | effect |
//! |------|--------|--------|
//! | 1    | 1      | no     |
//! | 2    | 2      | no     |
//! | 3, 4 | 0      | no     |
//! | 5, 6 | 1      | yes    |

use serde::{Deserialize, Serialize};

/// Damage and effect flag for a single face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceValue {
    pub damage: u32,
    pub effect: bool,
}

/// Classify one combat die face
pub fn classify(face: u32) -> FaceValue {
    let damage = match face {
        1 | 5 | 6 => 1,
        2 => 2,
        _ => 0,
    };
    FaceValue {
        damage,
        effect: matches!(face, 5 | 6),
    }
}

/// Markdown rendering of a face: plain for blanks, italic for damage,
/// bold italic when the face also triggers an effect.
pub fn display_text(face: u32, value: FaceValue) -> String {
    if value.damage == 0 {
        face.to_string()
    } else if value.effect {
        format!("_**{}**_", face)
    } else {
        format!("_{}_", face)
    }
}

/// One classified die
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// Position in the rolled sequence
    pub index: usize,
    pub damage: u32,
    pub effect: bool,
    pub output: String,
}

/// Classified dice plus their totals
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RollTally {
    pub results: Vec<DieResult>,
    pub damage: u32,
    pub effects: u32,
}

/// Classify every face, keeping roll order, and sum damage and effects
pub fn tally(faces: &[u32]) -> RollTally {
    let results: Vec<DieResult> = faces
        .iter()
        .enumerate()
        .map(|(index, &face)| {
            let value = classify(face);
            DieResult {
                index,
                damage: value.damage,
                effect: value.effect,
                output: display_text(face, value),
            }
        })
        .collect();

    RollTally {
        damage: results.iter().map(|r| r.damage).sum(),
        effects: results.iter().filter(|r| r.effect).count() as u32,
        results,
    }
}
