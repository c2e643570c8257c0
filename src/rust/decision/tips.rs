use crate::types::{Label, WasteClass};

/// Disposal advice for a final label.
pub fn disposal_tip(label: Label) -> &'static str {
    match label {
        Label::Class(WasteClass::Organic) => {
            "Use the brown bin or compost it. Organic waste can become fertilizer."
        }
        Label::Class(WasteClass::Recyclable) => {
            "Use the blue bin or a selective collection point. Rinse and separate it to make recycling easier."
        }
        Label::Class(WasteClass::Reject) => {
            "Use the gray or black bin (general waste). This material is neither recyclable nor compostable."
        }
        Label::Class(WasteClass::Hazardous) => {
            "Do NOT put this in household waste! Take it to a special collection or drop-off point. Hazardous waste contaminates the environment."
        }
        Label::Unknown => {
            "Uncertain classification. Ask your local collection service how to dispose of this item."
        }
    }
}
