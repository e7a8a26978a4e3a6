//! The static technology tag catalog offered by the product editor.
//!
//! Tags are plain strings on the wire; this table only drives the picker.
//! Products may carry tags outside this table (older data, other tools) and
//! those are preserved untouched.

/// Picker groups in display order.
pub const GROUPS: &[(&str, &[&str])] = &[
  ("Frontend", &["React", "Next.js", "Vue.js", "Angular", "Svelte"]),
  ("Backend", &["Node.js", "Express", "NestJS"]),
  ("Database", &["MongoDB", "MySQL", "PostgreSQL", "Firebase"]),
  (
    "Languages & Styling",
    &["TypeScript", "JavaScript", "HTML", "CSS", "Tailwind CSS", "Bootstrap"],
  ),
  ("State Management", &["Redux", "Zustand", "Recoil"]),
  (
    "Cloud & DevOps",
    &["AWS", "Azure", "Google Cloud", "Vercel", "Netlify", "Docker", "Kubernetes"],
  ),
  ("Python", &["Python", "Django", "Flask"]),
  (
    "Other",
    &[
      "GraphQL", "REST API", "Sass", "Less", "Git", "GitHub", "GitLab",
      "Webpack", "Vite",
    ],
  ),
  ("Testing", &["Jest", "Cypress", "Playwright"]),
  ("ORM", &["Prisma", "Sequelize", "Mongoose"]),
];

/// Every catalog tag, flattened in display order.
pub fn all() -> impl Iterator<Item = &'static str> {
  GROUPS.iter().flat_map(|(_, tags)| tags.iter().copied())
}

/// Whether `tag` is part of the picker catalog.
pub fn is_known(tag: &str) -> bool {
  all().any(|known| known == tag)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn catalog_is_flat_and_duplicate_free() {
    let tags: Vec<_> = all().collect();
    assert_eq!(tags.len(), 46);
    let mut unique = tags.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), tags.len());
  }

  #[test]
  fn knows_its_own_tags_and_nothing_else() {
    assert!(is_known("React"));
    assert!(is_known("Mongoose"));
    assert!(!is_known("COBOL"));
    assert!(!is_known("react"));
  }
}
