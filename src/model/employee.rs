use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member of staff shown as a band of rows on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    /// Display color for this employee's worked-time bars (stored as RGBA).
    #[serde(with = "color_serde")]
    pub color: Color32,
}

impl Employee {
    pub fn new(name: impl Into<String>, color: Color32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color,
        }
    }
}

/// Serde helper for `Color32`.
pub(crate) mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        rgba.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ))
    }
}
