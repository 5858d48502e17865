use std::path::Path;

use veta_core::error::VetaError;
use veta_core::model::Tier;
use veta_core::scheme::builtin;

pub fn list() -> Result<(), VetaError> {
    println!("Available predefined schemes:\n");
    for name in builtin::PRESETS {
        let scheme = builtin::load_preset(name)?;
        println!(
            "  {:<10} {} (v{}) [{}]",
            name, scheme.name, scheme.version, scheme.material
        );
        if let Some(ref desc) = scheme.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), VetaError> {
    let scheme = builtin::load_preset(preset)?;

    println!("{} (version {})\n", scheme.name, scheme.version);

    if let Some(ref desc) = scheme.description {
        println!("{}\n", desc);
    }

    println!(
        "This scheme classifies {} ore records into three copper-grade tiers:\n",
        scheme.material.to_string().to_lowercase()
    );

    for tier in Tier::ALL {
        print!("  {:<14} {}", tier.to_string(), scheme.interval(tier));
        if let Some(desc) = scheme.tier_descriptions.get(tier.key()) {
            println!("  -- {}", desc);
        } else {
            println!();
        }
    }

    println!();
    println!(
        "Records below %Cu {} fall outside the tiers. They are left out",
        scheme.cutoff
    );
    println!("of the tier tables but still count toward the material totals.");
    println!();
    println!("Summary grades are averaged per tier weighted by dry tonnage (TMS).");

    Ok(())
}

pub fn schema() -> Result<(), VetaError> {
    print!(
        r#"JSON Scheme Schema
==================

A scheme file defines the copper-grade tier boundaries for one material
type. When you run `veta analyze`, each record's %Cu is compared against
these boundaries to pick its tier.

Fields:
  name          (string, required)  Human-readable name of the scheme
  description   (string, optional)  What this scheme is for
  version       (string, required)  Version identifier (e.g., "2025.1")
  material      (string, required)  "sulfide" or "mixed". A dataset is
                                    matched to the scheme with the same
                                    material type.
  cutoff        (string, required)  Records with %Cu below this value
                                    belong to no tier (still counted in
                                    totals). The standard cutoff is "0.1".
  medium_min    (string, required)  Lower bound of the medium tier,
                                    inclusive. Grades from `cutoff` up to
                                    (but excluding) this value are low.
  medium_max    (string, required)  Upper bound of the medium tier,
                                    inclusive. Grades above are high.
  tier_descriptions
                (object, optional)  Map of "low"/"medium"/"high" to a
                                    human-readable description. Used by
                                    `veta schemes explain`.

Example:
{{
  "name": "Sulfide ore (site B)",
  "description": "Site-specific tier boundaries",
  "version": "1.0",
  "material": "sulfide",
  "cutoff": "0.1",
  "medium_min": "0.9",
  "medium_max": "1.1",
  "tier_descriptions": {{
    "low": "stockpile",
    "medium": "blend feed",
    "high": "direct mill feed"
  }}
}}

Note: boundary values must be quoted strings, not bare numbers, to
preserve exact decimal precision (e.g., "0.1" not 0.1). The engine
requires cutoff < medium_min <= medium_max.
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), VetaError> {
    let scheme = veta_core::scheme::load_scheme(file)?;

    println!(
        "Scheme '{}' (v{}) is valid for {} ore.",
        scheme.name, scheme.version, scheme.material
    );
    for tier in Tier::ALL {
        println!("  {:<14} {}", tier.to_string(), scheme.interval(tier));
    }

    // Non-fatal oddities worth flagging
    let mut warnings = Vec::new();
    if scheme.medium_min == scheme.medium_max {
        warnings.push(format!(
            "medium tier is a single point ({})",
            scheme.medium_min
        ));
    }
    for key in scheme.tier_descriptions.keys() {
        if !Tier::ALL.iter().any(|t| t.key() == key) {
            warnings.push(format!("tier_descriptions has unknown key '{}'", key));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
