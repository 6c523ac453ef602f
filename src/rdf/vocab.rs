pub(crate) const FOAF_NAME: &str = "http://xmlns.com/foaf/0.1/name";
pub(crate) const VCARD_FN: &str = "http://www.w3.org/2006/vcard/ns#fn";

pub(crate) const PIM_STORAGE: &str = "http://www.w3.org/ns/pim/space#storage";
pub(crate) const PIM_STORAGE_TYPE: &str = "http://www.w3.org/ns/pim/space#Storage";
pub(crate) const PIM_PREFERENCES_FILE: &str = "http://www.w3.org/ns/pim/space#preferencesFile";

pub(crate) const SOLID_PUBLIC_TYPE_INDEX: &str = "http://www.w3.org/ns/solid/terms#publicTypeIndex";
pub(crate) const SOLID_PRIVATE_TYPE_INDEX: &str =
    "http://www.w3.org/ns/solid/terms#privateTypeIndex";
