//! Development indicators retained by the pipeline.
//!
//! Names are matched exactly against the `INDICATOR_NAME` column, so they must
//! keep the source dataset's spelling and punctuation.

pub const INDICATOR_WHITELIST: &[&str] = &[
    "Access to electricity (% of population)",
    "Adjusted net national income per capita (current US$)",
    "Age dependency ratio (% of working-age population)",
    "Age dependency ratio, old (% of working-age population)",
    "Birth rate, crude (per 1,000 people)",
    "Cause of death, by communicable diseases and maternal, prenatal and nutrition conditions (% of total)",
    "Cause of death, by non-communicable diseases (% of total)",
    "Current health expenditure (% of GDP)",
    "Current health expenditure per capita (current US$)",
    "Death rate, crude (per 1,000 people)",
    "Diabetes prevalence (% of population ages 20 to 79)",
    "Domestic general government health expenditure (% of GDP)",
    "GDP (current US$)",
    "GDP growth (annual %)",
    "GDP per capita (current US$)",
    "GDP per capita, PPP (current international $)",
    "Gini index (World Bank estimate)",
    "Hospital beds (per 1,000 people)",
    "Immunization, measles (% of children ages 12-23 months)",
    "Incidence of tuberculosis (per 100,000 people)",
    "Individuals using the Internet (% of population)",
    "International tourism, number of arrivals",
    "Life expectancy at birth, total (years)",
    "Mortality rate, under-5 (per 1,000 live births)",
    "Nurses and midwives (per 1,000 people)",
    "Out-of-pocket expenditure (% of current health expenditure)",
    "People using at least basic drinking water services (% of population)",
    "People using at least basic sanitation services (% of population)",
    "Physicians (per 1,000 people)",
    "PM2.5 air pollution, mean annual exposure (micrograms per cubic meter)",
    "Population ages 0-14 (% of total population)",
    "Population ages 15-64 (% of total population)",
    "Population ages 65 and above (% of total population)",
    "Population density (people per sq. km of land area)",
    "Population growth (annual %)",
    "Population in the largest city (% of urban population)",
    "Population, total",
    "Poverty headcount ratio at $1.90 a day (2011 PPP) (% of population)",
    "Prevalence of undernourishment (% of population)",
    "Smoking prevalence, total (ages 15+)",
    "Unemployment, total (% of total labor force) (modeled ILO estimate)",
    "Urban population (% of total population)",
];

/// Country names as spelled by the indicator dataset, mapped to the case
/// dataset's spelling.
pub const DEFAULT_COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("United States", "US"),
    ("Korea, Rep.", "Korea, South"),
    ("Russian Federation", "Russia"),
    ("Iran, Islamic Rep.", "Iran"),
    ("Egypt, Arab Rep.", "Egypt"),
    ("Venezuela, RB", "Venezuela"),
    ("Syrian Arab Republic", "Syria"),
    ("Slovak Republic", "Slovakia"),
    ("Kyrgyz Republic", "Kyrgyzstan"),
    ("Lao PDR", "Laos"),
    ("Czech Republic", "Czechia"),
    ("Yemen, Rep.", "Yemen"),
    ("Gambia, The", "Gambia"),
    ("Bahamas, The", "Bahamas"),
    ("Brunei Darussalam", "Brunei"),
    ("Congo, Dem. Rep.", "Congo (Kinshasa)"),
    ("Congo, Rep.", "Congo (Brazzaville)"),
    ("Myanmar", "Burma"),
    ("St. Lucia", "Saint Lucia"),
    ("St. Kitts and Nevis", "Saint Kitts and Nevis"),
    ("St. Vincent and the Grenadines", "Saint Vincent and the Grenadines"),
];
