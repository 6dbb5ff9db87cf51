use indexmap::IndexMap;

/// Encounter configs compiled into the binary, keyed by id.
pub fn builtin_encounters() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        (
            "demon_ambush",
            include_str!("../content/encounters/demon_ambush.json"),
        ),
        (
            "goblin_skirmish",
            include_str!("../content/encounters/goblin_skirmish.json"),
        ),
    ])
}
