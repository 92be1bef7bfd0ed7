/// Feed nickname -> full franchise name.
const NBA_TEAMS: [(&str, &str); 30] = [
    ("76ers", "Philadelphia 76ers"),
    ("Bucks", "Milwaukee Bucks"),
    ("Bulls", "Chicago Bulls"),
    ("Cavaliers", "Cleveland Cavaliers"),
    ("Celtics", "Boston Celtics"),
    ("Clippers", "LA Clippers"),
    ("Grizzlies", "Memphis Grizzlies"),
    ("Hawks", "Atlanta Hawks"),
    ("Heat", "Miami Heat"),
    ("Hornets", "Charlotte Hornets"),
    ("Jazz", "Utah Jazz"),
    ("Kings", "Sacramento Kings"),
    ("Knicks", "New York Knicks"),
    ("Lakers", "Los Angeles Lakers"),
    ("Magic", "Orlando Magic"),
    ("Mavericks", "Dallas Mavericks"),
    ("Nets", "Brooklyn Nets"),
    ("Nuggets", "Denver Nuggets"),
    ("Pacers", "Indiana Pacers"),
    ("Pelicans", "New Orleans Pelicans"),
    ("Pistons", "Detroit Pistons"),
    ("Raptors", "Toronto Raptors"),
    ("Rockets", "Houston Rockets"),
    ("Spurs", "San Antonio Spurs"),
    ("Suns", "Phoenix Suns"),
    ("Thunder", "Oklahoma City Thunder"),
    ("Timberwolves", "Minnesota Timberwolves"),
    ("Trail Blazers", "Portland Trail Blazers"),
    ("Warriors", "Golden State Warriors"),
    ("Wizards", "Washington Wizards"),
];

pub fn full_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    NBA_TEAMS
        .iter()
        .find(|(short, full)| short.eq_ignore_ascii_case(name) || full.eq_ignore_ascii_case(name))
        .map(|(_, full)| *full)
}

pub fn short_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    NBA_TEAMS
        .iter()
        .find(|(short, full)| short.eq_ignore_ascii_case(name) || full.eq_ignore_ascii_case(name))
        .map(|(short, _)| *short)
}

pub fn is_nba_team(name: &str) -> bool {
    full_name(name).is_some()
}

/// Pick the spelling of `wanted` that actually occurs in `known` (feed team
/// names), so user input like "Boston Celtics" can match a feed that says
/// "Celtics". Falls back to the trimmed input.
pub fn resolve_against<'a>(wanted: &str, known: impl IntoIterator<Item = &'a str>) -> String {
    let wanted = wanted.trim();
    let target = full_name(wanted);
    for candidate in known {
        if candidate.trim().eq_ignore_ascii_case(wanted) {
            return candidate.trim().to_string();
        }
        if target.is_some() && full_name(candidate) == target {
            return candidate.trim().to_string();
        }
    }
    wanted.to_string()
}
