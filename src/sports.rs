// ABOUTME: Static sport code table for Endomondo workout records
// ABOUTME: Maps the service's integer sport codes to human-readable labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Resolve an Endomondo sport code to its display name.
///
/// The table is the fixed mapping the mobile API has always shipped (codes
/// 0 through 50). Code 22 is the service's explicit "Other" entry, and any
/// unrecognized code resolves to "Other" as well — the two cases are not
/// distinguishable from the return value alone.
#[must_use]
pub const fn sport_name(code: i64) -> &'static str {
    match code {
        0 => "Running",
        1 => "Cycling, transport",
        2 => "Cycling, sport",
        3 => "Mountain biking",
        4 => "Skating",
        5 => "Roller skiing",
        6 => "Skiing, cross country",
        7 => "Skiing, downhill",
        8 => "Snowboarding",
        9 => "Kayaking",
        10 => "Kite surfing",
        11 => "Rowing",
        12 => "Sailing",
        13 => "Windsurfing",
        14 => "Fitness walking",
        15 => "Golfing",
        16 => "Hiking",
        17 => "Orienteering",
        18 => "Walking",
        19 => "Riding",
        20 => "Swimming",
        21 => "Spinning",
        23 => "Aerobics",
        24 => "Badminton",
        25 => "Baseball",
        26 => "Basketball",
        27 => "Boxing",
        28 => "Climbing stairs",
        29 => "Cricket",
        30 => "Cross training",
        31 => "Dancing",
        32 => "Fencing",
        33 => "Football, American",
        34 => "Football, rugby",
        35 => "Football, soccer",
        36 => "Handball",
        37 => "Hockey",
        38 => "Pilates",
        39 => "Polo",
        40 => "Scuba diving",
        41 => "Squash",
        42 => "Table tennis",
        43 => "Tennis",
        44 => "Volleyball, beach",
        45 => "Volleyball, indoor",
        46 => "Weight training",
        47 => "Yoga",
        48 => "Martial arts",
        49 => "Gymnastics",
        50 => "Step counter",
        _ => "Other",
    }
}
