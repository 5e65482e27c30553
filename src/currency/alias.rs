//! The fixed tag → canonical-name table, carried over verbatim from the
//! original chat-command era: players abbreviate and misspell currency names
//! in wildly inconsistent ways, and the buyout parser has to meet them there.

const CHAOS: &str = "Chaos Orb";
const EXALTED: &str = "Exalted Orb";
const VAAL: &str = "Vaal Orb";
const REGRET: &str = "Orb of Regret";
const CHANCE: &str = "Orb of Chance";
const DIVINE: &str = "Divine Orb";
const ALTERATION: &str = "Orb of Alteration";
const ALCHEMY: &str = "Orb of Alchemy";
const FUSING: &str = "Orb of Fusing";
const JEWELLER: &str = "Jeweller's Orb";
const GCP: &str = "Gemcutter's Prism";
const BLESSED: &str = "Blessed Orb";

const ALIASES: &[(&str, &str)] = &[
    ("chaos", CHAOS),
    ("chaoss", CHAOS),
    ("chaosgg", CHAOS),
    ("choas", CHAOS),
    ("chaos3", CHAOS),
    ("chas", CHAOS),
    ("chaos_crab3", CHAOS),
    ("chaos1", CHAOS),
    ("chaos2", CHAOS),
    ("c", CHAOS),
    ("vaal", VAAL),
    ("regret", REGRET),
    ("exa", EXALTED),
    ("exalted", EXALTED),
    ("exalteds", EXALTED),
    ("ex", EXALTED),
    ("exalt", EXALTED),
    ("exalts", EXALTED),
    ("chance", CHANCE),
    ("divine", DIVINE),
    ("alt", ALTERATION),
    ("alts", ALTERATION),
    ("altq", ALTERATION),
    ("alteration", ALTERATION),
    ("alch", ALCHEMY),
    ("alch2", ALCHEMY),
    ("alch3", ALCHEMY),
    ("alchemy", ALCHEMY),
    ("alc", ALCHEMY),
    ("chisel", "Cartographer's Chisel"),
    ("fuse", FUSING),
    ("fusing", FUSING),
    ("fus", FUSING),
    ("jew", JEWELLER),
    ("jewellers", JEWELLER),
    ("scour", "Orb of Scouring"),
    ("regal", "Regal Orb"),
    ("chrom", "Chromatic Orb"),
    ("gcp", GCP),
    ("pris", GCP),
    ("blessed", BLESSED),
    ("bless", BLESSED),
];

/// Looks up a lowercased tag, returning the currency's canonical name.
pub fn canonicalize(tag: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map(|(_, canonical)| *canonical)
}
