//! Club catalog: canonical ordering, categories, and abbreviations.

/// Canonical display order, longest club first.
pub const CLUB_ORDER: &[&str] = &[
    "Driver",
    "3 Wood",
    "5 Wood",
    "7 Wood",
    "3 Hybrid",
    "4 Hybrid",
    "5 Hybrid",
    "3 Iron",
    "4 Iron",
    "5 Iron",
    "6 Iron",
    "7 Iron",
    "8 Iron",
    "9 Iron",
    "Pitching Wedge",
    "Gap Wedge",
    "Sand Wedge",
    "Lob Wedge",
    "Putter",
];

/// A named group of catalog clubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClubCategory {
    pub name: &'static str,
    pub clubs: &'static [&'static str],
}

/// Catalog categories offered when managing the bag.
pub const CATEGORIES: &[ClubCategory] = &[
    ClubCategory {
        name: "Drivers",
        clubs: &["Driver"],
    },
    ClubCategory {
        name: "Woods",
        clubs: &["3 Wood", "5 Wood", "7 Wood"],
    },
    ClubCategory {
        name: "Hybrids",
        clubs: &["3 Hybrid", "4 Hybrid", "5 Hybrid"],
    },
    ClubCategory {
        name: "Irons",
        clubs: &[
            "3 Iron", "4 Iron", "5 Iron", "6 Iron", "7 Iron", "8 Iron", "9 Iron",
        ],
    },
    ClubCategory {
        name: "Wedges",
        clubs: &["Pitching Wedge", "Gap Wedge", "Sand Wedge", "Lob Wedge"],
    },
    ClubCategory {
        name: "Putters",
        clubs: &["Putter"],
    },
];

/// Position of a club in [`CLUB_ORDER`], or `None` for user-defined names.
pub fn canonical_rank(club: &str) -> Option<usize> {
    CLUB_ORDER.iter().position(|c| *c == club)
}

/// Catalog spelling of `input`, matched case-insensitively.
///
/// Names outside the catalog are returned trimmed but otherwise untouched.
pub fn canonical_name(input: &str) -> String {
    let input = input.trim();
    CLUB_ORDER
        .iter()
        .find(|club| club.eq_ignore_ascii_case(input))
        .map(|club| club.to_string())
        .unwrap_or_else(|| input.to_string())
}

/// Short display code for a club.
///
/// Unknown names fall back to their first two characters, upper-cased.
pub fn abbreviation(club: &str) -> String {
    let known = match club {
        "Driver" => "Dr",
        "3 Wood" => "3w",
        "5 Wood" => "5w",
        "7 Wood" => "7w",
        "3 Hybrid" => "3h",
        "4 Hybrid" => "4h",
        "5 Hybrid" => "5h",
        "3 Iron" => "3i",
        "4 Iron" => "4i",
        "5 Iron" => "5i",
        "6 Iron" => "6i",
        "7 Iron" => "7i",
        "8 Iron" => "8i",
        "9 Iron" => "9i",
        "Pitching Wedge" => "PW",
        "Gap Wedge" => "GW",
        "Sand Wedge" => "SW",
        "Lob Wedge" => "LW",
        "Putter" => "P",
        _ => return club.chars().take(2).collect::<String>().to_uppercase(),
    };
    known.to_string()
}
