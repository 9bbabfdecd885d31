use crate::category::FoodCategory;
use crate::model::Rgb;
use rust_decimal::Decimal;

/// Below this mean brightness the color window is treated as empty.
pub const EMPTY_FRAME_BRIGHTNESS: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// A visual spoilage rule for one food category.
pub struct MoldRule {
    pub category: FoodCategory,
    /// Short description of what the rule looks for.
    pub describes: &'static str,
    fires: fn(&Rgb) -> bool,
}

impl MoldRule {
    pub fn fires(&self, color: &Rgb) -> bool {
        (self.fires)(color)
    }
}

fn brightness_between(color: &Rgb, low: i64, high: i64) -> bool {
    let brightness = color.brightness();
    brightness > Decimal::from(low) && brightness < Decimal::from(high)
}

fn nasi_mold(color: &Rgb) -> bool {
    color.green_shift() > 20 || color.blue_shift() > 20 || brightness_between(color, 20, 60)
}

fn roti_mold(color: &Rgb) -> bool {
    color.green_shift() > 15 || color.blue_shift() > 15
}

fn tempe_mold(color: &Rgb) -> bool {
    brightness_between(color, 15, 40)
}

// Grilled or seasoned meat reads strongly red; only a pronounced
// green/blue shift counts.
fn daging_mold(color: &Rgb) -> bool {
    color.green_shift() > 30 || color.blue_shift() > 30
}

/// Rules in evaluation order. Markers are matched case-sensitively.
pub static MOLD_RULES: [MoldRule; 4] = [
    MoldRule {
        category: FoodCategory::Nasi,
        describes: "green/blue > red + 20, or dim (brightness 20-60)",
        fires: nasi_mold,
    },
    MoldRule {
        category: FoodCategory::Roti,
        describes: "green/blue > red + 15",
        fires: roti_mold,
    },
    MoldRule {
        category: FoodCategory::Tempe,
        describes: "dark patches (brightness 15-40)",
        fires: tempe_mold,
    },
    MoldRule {
        category: FoodCategory::Daging,
        describes: "green/blue > red + 30",
        fires: daging_mold,
    },
];

/// Return the first rule that flags `color` as mold for `food_name`.
///
/// Every rule whose marker appears in the name is tried in table order, so a
/// name like "Nasi Roti" falls through to the bread rule when the rice rule
/// does not fire.
pub fn matching_mold_rule(color: &Rgb, food_name: &str) -> Option<&'static MoldRule> {
    if color.brightness() < EMPTY_FRAME_BRIGHTNESS {
        return None;
    }

    MOLD_RULES
        .iter()
        .filter(|rule| rule.category.in_name(food_name))
        .find(|rule| rule.fires(color))
}

/// Whether the color reading shows visible spoilage for this food.
pub fn detect_mold(r: i32, g: i32, b: i32, food_name: &str) -> bool {
    matching_mold_rule(&Rgb::new(r, g, b), food_name).is_some()
}
