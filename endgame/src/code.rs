use cozy_chess::{Color, Piece};
use thiserror::Error;
use utils::{MaterialCounts, MaterialKey};

/// Codes list the strong side first: "KBPKN" is king, bishop and pawn
/// against king and knight.
pub const MAX_CODE_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("endgame code is empty")]
    Empty,
    #[error("endgame code \"{0}\" must be shorter than 8 characters")]
    TooLong(String),
    #[error("endgame code \"{0}\" must start with the strong side's king")]
    MissingStrongKing(String),
    #[error("endgame code \"{0}\" has no king for the weak side")]
    MissingWeakKing(String),
    #[error("endgame code \"{code}\" has more than one king per side")]
    ExtraKing { code: String },
    #[error("unknown piece '{piece}' in endgame code \"{code}\"")]
    UnknownPiece { code: String, piece: char },
}

fn piece_from_char(c: char) -> Option<Piece> {
    match c {
        'P' => Some(Piece::Pawn),
        'N' => Some(Piece::Knight),
        'B' => Some(Piece::Bishop),
        'R' => Some(Piece::Rook),
        'Q' => Some(Piece::Queen),
        'K' => Some(Piece::King),
        _ => None,
    }
}

/// Piece counts described by `code` with `strong_side` holding the first half.
pub fn material_counts(code: &str, strong_side: Color) -> Result<MaterialCounts, CodeError> {
    if code.is_empty() {
        return Err(CodeError::Empty);
    }
    if code.len() >= MAX_CODE_LEN {
        return Err(CodeError::TooLong(code.to_string()));
    }
    if !code.starts_with('K') {
        return Err(CodeError::MissingStrongKing(code.to_string()));
    }

    let split = match code[1..].find('K') {
        Some(idx) => idx + 1,
        None => return Err(CodeError::MissingWeakKing(code.to_string())),
    };
    let (strong, weak) = code.split_at(split);

    let mut counts = MaterialCounts::default();
    for (side, color) in [(strong, strong_side), (weak, !strong_side)] {
        for (i, c) in side.chars().enumerate() {
            let piece = piece_from_char(c).ok_or_else(|| CodeError::UnknownPiece {
                code: code.to_string(),
                piece: c,
            })?;
            if piece == Piece::King && i > 0 {
                return Err(CodeError::ExtraKing {
                    code: code.to_string(),
                });
            }
            counts.add(color, piece);
        }
    }

    Ok(counts)
}

/// Material key of any position whose inventory matches `code`.
pub fn material_key(code: &str, strong_side: Color) -> Result<MaterialKey, CodeError> {
    material_counts(code, strong_side).map(|counts| counts.key())
}
