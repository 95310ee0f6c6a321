// Series colors

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const RED: Color = Color::rgb(217, 0, 116);
pub const GREEN: Color = Color::rgb(0, 217, 101);
pub const BLUE: Color = Color::rgb(0, 116, 217);
pub const ORANGE: Color = Color::rgb(217, 101, 0);
pub const YELLOW: Color = Color::rgb(217, 210, 0);
pub const CYAN: Color = Color::rgb(0, 217, 210);

const PALETTE: [Color; 6] = [RED, GREEN, BLUE, ORANGE, YELLOW, CYAN];

/// Color for the `n`-th jurisdiction of a chart; cycles when jurisdictions outnumber the palette.
pub fn palette_color(n: usize) -> Color {
    PALETTE[n % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(RED.to_hex(), "#d90074");
        assert_eq!(Color::rgb(0, 0, 0).to_hex(), "#000000");
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), RED);
        assert_eq!(palette_color(5), CYAN);
        assert_eq!(palette_color(6), RED);
        assert_eq!(palette_color(8), BLUE);
    }
}
