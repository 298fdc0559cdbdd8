use crate::models::MedicationRecord;

lazy_static::lazy_static! {
    static ref CATALOG: Vec<MedicationRecord> = vec![
        MedicationRecord::new("Aspirin", "Anti-platelet", "Oral", "Cardiac Chest Pain", "Active or recent bleeding", "324 mg"),
        MedicationRecord::new("Nitroglycerin", "Nitrate", "SL", "Cardiac Chest Pain", "BP < 100 systolic, ED meds", "0.4 mg"),
        MedicationRecord::new("Epinephrine 1:1000", "Sympathomimetic", "IM", "Anaphylaxis", "None in true emergency", "0.3 mg"),
        MedicationRecord::new("Albuterol", "Bronchodilator", "Inhaled", "Asthma/Wheezing", "Tachycardia, Chest pain", "2.5 mg"),
        MedicationRecord::new("Oral Glucose", "Carbohydrate", "Buccal", "Hypoglycemia", "Unconscious, No airway", "25 g"),
        MedicationRecord::new("Activated Charcoal", "Adsorbent", "Oral", "Poisoning/Overdose", "Decreased LOC, Corrosives", "1 g/kg"),
        MedicationRecord::new("Zofran", "Anti-emetic", "Oral (ODT)", "Nausea", "Hypersensitivity", "4-8 mg"),
        MedicationRecord::new("Narcan", "Opiate Antagonist", "IM, IN", "Opiate Overdose", "None in true emergency", "0.4 - 2.0 mg"),
        MedicationRecord::new("Benadryl", "Anti-histamine", "Oral", "Allergic Reaction", "Hypertension, Constipation", "25-50 mg"),
        MedicationRecord::new("Duo-Neb", "Beta Agonist + Anticholinergic", "Inhaled", "COPD/Asthma", "Tachycardia", "3.0 mL"),
        MedicationRecord::new("Glucagon", "Hormone", "IM", "BGL < 50, Unable to swallow", "None in true emergency", "1 mg"),
        MedicationRecord::new("Duo-Dote", "Parasympatholytic", "IM", "Organophosphate Poison", "None in true emergency", "2 mg Atropine"),
    ];
}

/// The built-in EMT medication catalog.
pub fn builtin_catalog() -> &'static [MedicationRecord] {
    &CATALOG
}
