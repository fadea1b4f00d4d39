use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Entity properties a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    ParkingSpotNumber,
    LicensePlateCar,
    ModelCar,
    BrandCar,
    ColorCar,
    ResponsibleName,
    Apartment,
    Block,
    RegistrationDate,
}

impl SortField {
    /// Column name in `tb_parking_spot`.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::ParkingSpotNumber => "parking_spot_number",
            SortField::LicensePlateCar => "license_plate_car",
            SortField::ModelCar => "model_car",
            SortField::BrandCar => "brand_car",
            SortField::ColorCar => "color_car",
            SortField::ResponsibleName => "responsible_name",
            SortField::Apartment => "apartment",
            SortField::Block => "block",
            SortField::RegistrationDate => "registration_date",
        }
    }

    /// `ORDER BY` term. Text columns compare by byte value so every store
    /// orders them the same way regardless of database locale.
    pub fn order_expr(&self) -> String {
        match self {
            SortField::Id | SortField::RegistrationDate => self.column().to_string(),
            _ => format!("{} COLLATE \"C\"", self.column()),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "parkingSpotNumber" => Ok(SortField::ParkingSpotNumber),
            "licensePlateCar" => Ok(SortField::LicensePlateCar),
            "modelCar" => Ok(SortField::ModelCar),
            "brandCar" => Ok(SortField::BrandCar),
            "colorCar" => Ok(SortField::ColorCar),
            "responsibleName" => Ok(SortField::ResponsibleName),
            "apartment" => Ok(SortField::Apartment),
            "block" => Ok(SortField::Block),
            "registrationDate" => Ok(SortField::RegistrationDate),
            other => Err(format!("Unknown sort property '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub property: SortField,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            property: SortField::Id,
            direction: SortDirection::Asc,
        }
    }
}

impl FromStr for Sort {
    type Err = String;

    /// Accepts `field` or `field,direction`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let property = parts.next().unwrap_or_default().parse()?;
        let direction = match parts.next() {
            Some(dir) if !dir.is_empty() => dir.parse()?,
            _ => SortDirection::Asc,
        };
        if parts.next().is_some() {
            return Err(format!("Invalid sort expression '{}'", s));
        }
        Ok(Self {
            property,
            direction,
        })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.property.order_expr(), self.direction.as_sql())
    }
}

/// Raw listing query string: `?page=0&size=10&sort=field,asc`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl PageParams {
    /// Negative pages become 0, sizes below 1 become the default and sizes are
    /// capped at `MAX_PAGE_SIZE`. A malformed sort expression is an error.
    pub fn into_request(self) -> Result<PageRequest, String> {
        let page = match self.page {
            Some(p) if p > 0 => p as u64,
            _ => DEFAULT_PAGE,
        };
        let size = match self.size {
            Some(s) if s < 1 => DEFAULT_PAGE_SIZE,
            Some(s) => (s as u64).min(MAX_PAGE_SIZE),
            None => DEFAULT_PAGE_SIZE,
        };
        let sort = match self.sort.as_deref() {
            Some(expr) if !expr.trim().is_empty() => expr.parse()?,
            _ => Sort::default(),
        };
        Ok(PageRequest::new(page, size, sort))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u64, size: u64, sort: Sort) -> Self {
        Self {
            page,
            size: size.max(1),
            sort,
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE, Sort::default())
    }
}

/// One slice of a sorted listing plus its position metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
    pub sort: Sort,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size);
        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
            first: request.page == 0,
            last: request.page + 1 >= total_pages,
            sort: request.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten_by_id() {
        let request = PageParams::default().into_request().unwrap();
        assert_eq!(request, PageRequest::new(0, 10, Sort::default()));
        assert_eq!(request.sort.property, SortField::Id);
        assert_eq!(request.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn out_of_range_values_are_normalized() {
        let params = PageParams {
            page: Some(-3),
            size: Some(0),
            sort: None,
        };
        let request = params.into_request().unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);

        let params = PageParams {
            page: Some(2),
            size: Some(1_000_000),
            sort: None,
        };
        let request = params.into_request().unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, MAX_PAGE_SIZE);
        assert_eq!(request.offset(), 2 * MAX_PAGE_SIZE);
    }

    #[test]
    fn parses_sort_expressions() {
        let sort: Sort = "licensePlateCar,desc".parse().unwrap();
        assert_eq!(sort.property, SortField::LicensePlateCar);
        assert_eq!(sort.direction, SortDirection::Desc);

        let sort: Sort = "registrationDate".parse().unwrap();
        assert_eq!(sort.property, SortField::RegistrationDate);
        assert_eq!(sort.direction, SortDirection::Asc);

        let sort: Sort = "block,ASC".parse().unwrap();
        assert_eq!(sort.direction, SortDirection::Asc);

        assert!("password".parse::<Sort>().is_err());
        assert!("block,sideways".parse::<Sort>().is_err());
        assert!("block,asc,extra".parse::<Sort>().is_err());
    }

    #[test]
    fn text_columns_order_by_byte_value() {
        let sort: Sort = "licensePlateCar,desc".parse().unwrap();
        assert_eq!(sort.to_string(), "license_plate_car COLLATE \"C\" DESC");
        assert_eq!(Sort::default().to_string(), "id ASC");

        let sort: Sort = "registrationDate".parse().unwrap();
        assert_eq!(sort.to_string(), "registration_date ASC");
    }

    #[test]
    fn page_metadata_reflects_position() {
        let request = PageRequest::new(0, 10, Sort::default());
        let page = Page::new(vec![1, 2, 3], &request, 3);
        assert_eq!(page.total_pages, 1);
        assert!(page.first);
        assert!(page.last);
        assert!(!page.empty);
        assert_eq!(page.number_of_elements, 3);

        let request = PageRequest::new(1, 2, Sort::default());
        let page = Page::new(vec![3, 4], &request, 5);
        assert_eq!(page.total_pages, 3);
        assert!(!page.first);
        assert!(!page.last);

        let request = PageRequest::new(7, 10, Sort::default());
        let page: Page<i32> = Page::new(vec![], &request, 5);
        assert!(page.empty);
        assert!(page.last);
        assert_eq!(page.total_elements, 5);
    }

    #[test]
    fn page_serializes_spring_shape() {
        let page = Page::new(vec!["a"], &PageRequest::default(), 1);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["totalElements"], 1);
        assert_eq!(value["numberOfElements"], 1);
        assert_eq!(value["sort"]["property"], "id");
        assert_eq!(value["sort"]["direction"], "ASC");
    }
}
