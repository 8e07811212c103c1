use super::ColorCode;

/// Code used for labels that are not a known rarity.
pub const DEFAULT_CODE: ColorCode = ColorCode::Gray;

/// Maps a rarity label (any case) to the colour code its name is drawn in.
pub fn rarity_to_code(rarity: &str) -> ColorCode {
    match rarity.to_lowercase().as_str() {
        "common" => ColorCode::White,
        "uncommon" => ColorCode::Green,
        "rare" => ColorCode::Blue,
        "epic" => ColorCode::DarkPurple,
        "legendary" => ColorCode::Gold,
        "mythic" => ColorCode::LightPurple,
        "divine" => ColorCode::Aqua,
        "special" | "very special" => ColorCode::Red,
        "ultimate" | "admin" => ColorCode::DarkRed,
        _ => DEFAULT_CODE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_fixed_codes() {
        let cases = [
            ("common", 'f'),
            ("uncommon", 'a'),
            ("rare", '9'),
            ("epic", '5'),
            ("legendary", '6'),
            ("mythic", 'd'),
            ("divine", 'b'),
            ("special", 'c'),
            ("very special", 'c'),
            ("ultimate", '4'),
            ("admin", '4'),
        ];
        for (label, code) in cases {
            assert_eq!(rarity_to_code(label).as_char(), code, "{label}");
            assert_eq!(rarity_to_code(&label.to_uppercase()).as_char(), code, "{label}");
        }
    }

    #[test]
    fn mixed_case_is_accepted() {
        assert_eq!(rarity_to_code("LeGeNdArY"), ColorCode::Gold);
        assert_eq!(rarity_to_code("Very Special"), ColorCode::Red);
    }

    #[test]
    fn unknown_label_falls_back_to_gray() {
        assert_eq!(rarity_to_code("supreme"), DEFAULT_CODE);
        assert_eq!(rarity_to_code(""), ColorCode::Gray);
        assert_eq!(rarity_to_code("veryspecial").as_char(), '7');
    }
}
