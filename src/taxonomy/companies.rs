//! Curated catalog of major technology companies.
//!
//! A flat alias set: "meta" and "facebook" are separate entries for the same
//! corporate actor on purpose, since the analysis only reports presence, never
//! per-company counts. Entries are lowercase; matching is case-insensitive and
//! whole-word.

pub const BIG_TECH_COMPANIES: &[&str] = &[
    // North America
    "ibm",
    "ibm research",
    "ibm linux technology center",
    "microsoft",
    "microsoft azure",
    "azure",
    "microsoft research",
    "google",
    "google cloud",
    "alphabet",
    "amazon",
    "amazon web services",
    "aws",
    "facebook",
    "meta",
    "meta platforms",
    "apple",
    "intel",
    "oracle",
    "oracle labs",
    "cisco",
    "cisco systems",
    "hp",
    "hewlett packard",
    "hp labs",
    "hpe",
    "hewlett packard enterprise",
    "nvidia",
    "vmware",
    "netflix",
    "uber",
    "twitter",
    "yahoo",
    "snap",
    "salesforce",
    "amd",
    "advanced micro devices",
    "qualcomm",
    "broadcom",
    // Asia
    "huawei",
    "alibaba",
    "alibaba cloud",
    "bytedance",
    "tencent",
    "baidu",
    "samsung",
    "xiaomi",
    "tiktok",
    // Europe
    "arm",
    "arm ltd",
    "arm limited",
    "arm holdings",
    "ericsson",
    "nokia",
    "siemens",
    "orange",
    "atos",
    "deutsche telekom",
    "bosch",
    "airbus",
    "sap",
    "telefonica",
    "telefónica",
    "vodafone",
    "thales",
    "philips",
];
