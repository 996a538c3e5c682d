//! Built-in Seoul place-name table, the last link of every geocoder chain.

use async_trait::async_trait;

use camsearch_core::{Coordinate, GeocodeResult, Result};

use crate::geocoder::Geocoder;

/// `(key, latitude, longitude, display name)`.
///
/// Order matters: the first key contained in the query wins, so a short key
/// listed before a longer one shadows it ("마포" answers "마포대교").
const PLACES: &[(&str, f64, f64, &str)] = &[
    ("강남", 37.4979, 127.0276, "강남역"),
    ("강남구", 37.5172, 127.0473, "강남구"),
    ("강남역", 37.4979, 127.0276, "강남역"),
    ("역삼", 37.5004, 127.0364, "역삼역"),
    ("역삼역", 37.5004, 127.0364, "역삼역"),
    ("선릉", 37.5045, 127.0487, "선릉역"),
    ("선릉역", 37.5045, 127.0487, "선릉역"),
    ("삼성", 37.5088, 127.0633, "삼성역"),
    ("삼성역", 37.5088, 127.0633, "삼성역"),
    ("논현", 37.5109, 127.0229, "논현역"),
    ("논현역", 37.5109, 127.0229, "논현역"),
    ("신논현", 37.5048, 127.0255, "신논현역"),
    ("신논현역", 37.5048, 127.0255, "신논현역"),
    ("교대", 37.4934, 127.0143, "교대역"),
    ("교대역", 37.4934, 127.0143, "교대역"),
    ("서초", 37.4837, 127.0324, "서초역"),
    ("서초역", 37.4837, 127.0324, "서초역"),
    ("서초구", 37.4837, 127.0324, "서초구"),
    ("양재", 37.4844, 127.0344, "양재역"),
    ("양재역", 37.4844, 127.0344, "양재역"),
    ("잠실", 37.5133, 127.1000, "잠실역"),
    ("잠실역", 37.5133, 127.1000, "잠실역"),
    ("잠실새내", 37.5213, 127.1231, "잠실새내역"),
    ("잠실새내역", 37.5213, 127.1231, "잠실새내역"),
    ("잠실대교", 37.5198, 127.0822, "잠실대교"),
    ("송파", 37.5048, 127.1116, "송파역"),
    ("송파역", 37.5048, 127.1116, "송파역"),
    ("문정", 37.4846, 127.1220, "문정역"),
    ("문정역", 37.4846, 127.1220, "문정역"),
    ("가락", 37.4925, 127.1187, "가락시장역"),
    ("가락시장", 37.4925, 127.1187, "가락시장역"),
    ("가락시장역", 37.4925, 127.1187, "가락시장역"),
    ("광진", 37.5384, 127.0822, "광진구"),
    ("광진교", 37.5489, 127.0645, "광진교"),
    ("건대", 37.5404, 127.0696, "건대입구역"),
    ("건대입구", 37.5404, 127.0696, "건대입구역"),
    ("건대입구역", 37.5404, 127.0696, "건대입구역"),
    ("구의", 37.5372, 127.0856, "구의역"),
    ("구의역", 37.5372, 127.0856, "구의역"),
    ("신촌", 37.5559, 126.9366, "신촌역"),
    ("신촌역", 37.5559, 126.9366, "신촌역"),
    ("홍대", 37.5572, 126.9239, "홍대입구역"),
    ("홍대입구", 37.5572, 126.9239, "홍대입구역"),
    ("홍대입구역", 37.5572, 126.9239, "홍대입구역"),
    ("이대", 37.5566, 126.9460, "이대역"),
    ("이대역", 37.5566, 126.9460, "이대역"),
    ("마포", 37.5663, 126.9019, "마포구"),
    ("합정", 37.5498, 126.9139, "합정역"),
    ("합정역", 37.5498, 126.9139, "합정역"),
    ("망원", 37.5560, 126.9105, "망원역"),
    ("망원역", 37.5560, 126.9105, "망원역"),
    ("상수", 37.5478, 126.9225, "상수역"),
    ("상수역", 37.5478, 126.9225, "상수역"),
    ("광화문", 37.5720, 126.9769, "광화문역"),
    ("광화문역", 37.5720, 126.9769, "광화문역"),
    ("시청", 37.5665, 126.9780, "시청역"),
    ("시청역", 37.5665, 126.9780, "시청역"),
    ("서울역", 37.5547, 126.9707, "서울역"),
    ("명동", 37.5636, 126.9824, "명동역"),
    ("명동역", 37.5636, 126.9824, "명동역"),
    ("종로", 37.5700, 126.9910, "종로3가역"),
    ("종로3가", 37.5700, 126.9910, "종로3가역"),
    ("종로3가역", 37.5700, 126.9910, "종로3가역"),
    ("을지로", 37.5664, 126.9910, "을지로입구역"),
    ("을지로입구", 37.5664, 126.9910, "을지로입구역"),
    ("을지로입구역", 37.5664, 126.9910, "을지로입구역"),
    ("동대문", 37.5710, 127.0099, "동대문역"),
    ("동대문역", 37.5710, 127.0099, "동대문역"),
    ("종로구", 37.5700, 126.9910, "종로구"),
    ("중구", 37.5636, 126.9979, "중구"),
    ("용산", 37.5299, 126.9644, "용산역"),
    ("용산역", 37.5299, 126.9644, "용산역"),
    ("삼각지", 37.5346, 126.9734, "삼각지역"),
    ("삼각지역", 37.5346, 126.9734, "삼각지역"),
    ("노량진", 37.5138, 126.9423, "노량진역"),
    ("노량진역", 37.5138, 126.9423, "노량진역"),
    ("영등포", 37.5155, 126.9073, "영등포역"),
    ("영등포역", 37.5155, 126.9073, "영등포역"),
    ("영등포구", 37.5264, 126.8962, "영등포구"),
    ("여의도", 37.5219, 126.9245, "여의도역"),
    ("여의도역", 37.5219, 126.9245, "여의도역"),
    ("당산", 37.5346, 126.9025, "당산역"),
    ("당산역", 37.5346, 126.9025, "당산역"),
    ("강북", 37.6396, 127.0254, "강북구"),
    ("노원", 37.6542, 127.0568, "노원역"),
    ("노원역", 37.6542, 127.0568, "노원역"),
    ("수유", 37.6389, 127.0256, "수유역"),
    ("수유역", 37.6389, 127.0256, "수유역"),
    ("미아", 37.6136, 127.0297, "미아역"),
    ("미아역", 37.6136, 127.0297, "미아역"),
    ("창동", 37.6534, 127.0472, "창동역"),
    ("창동역", 37.6534, 127.0472, "창동역"),
    ("도봉", 37.6689, 127.0470, "도봉구"),
    ("도봉구", 37.6689, 127.0470, "도봉구"),
    ("성북", 37.5894, 127.0167, "성북구"),
    ("성북구", 37.5894, 127.0167, "성북구"),
    ("중랑", 37.6063, 127.0926, "중랑구"),
    ("중랑구", 37.6063, 127.0926, "중랑구"),
    ("코엑스", 37.5115, 127.0590, "코엑스"),
    ("롯데타워", 37.5125, 127.1025, "롯데월드타워"),
    ("롯데월드", 37.5111, 127.0981, "롯데월드"),
    ("롯데월드타워", 37.5125, 127.1025, "롯데월드타워"),
    ("63빌딩", 37.5200, 126.9407, "63빌딩"),
    ("남산타워", 37.5512, 126.9882, "N서울타워"),
    ("n서울타워", 37.5512, 126.9882, "N서울타워"),
    ("경복궁", 37.5796, 126.9770, "경복궁"),
    ("덕수궁", 37.5658, 126.9751, "덕수궁"),
    ("남대문", 37.5597, 126.9775, "남대문"),
    ("동대문시장", 37.5660, 127.0090, "동대문시장"),
    ("국회의사당", 37.5320, 126.9170, "국회의사당"),
    ("여의도공원", 37.5282, 126.9244, "여의도공원"),
    ("올림픽공원", 37.5220, 127.1235, "올림픽공원"),
    ("한강공원", 37.5290, 126.9360, "한강공원"),
    ("반포한강공원", 37.5133, 126.9955, "반포한강공원"),
    ("서울대", 37.4601, 126.9520, "서울대학교"),
    ("서울대학교", 37.4601, 126.9520, "서울대학교"),
    ("연세대", 37.5665, 126.9398, "연세대학교"),
    ("연세대학교", 37.5665, 126.9398, "연세대학교"),
    ("고려대", 37.5850, 127.0297, "고려대학교"),
    ("고려대학교", 37.5850, 127.0297, "고려대학교"),
    ("이화여대", 37.5616, 126.9465, "이화여자대학교"),
    ("이화여자대학교", 37.5616, 126.9465, "이화여자대학교"),
    ("서강대", 37.5509, 126.9410, "서강대학교"),
    ("서강대학교", 37.5509, 126.9410, "서강대학교"),
    ("한양대", 37.5558, 127.0444, "한양대학교"),
    ("한양대학교", 37.5558, 127.0444, "한양대학교"),
    ("강남대로", 37.5050, 127.0270, "강남대로"),
    ("테헤란로", 37.5004, 127.0364, "테헤란로"),
    ("올림픽대로", 37.5198, 127.0822, "올림픽대로"),
    ("강변북로", 37.5489, 127.0645, "강변북로"),
    ("세종대로", 37.5665, 126.9780, "세종대로"),
    ("한강대로", 37.5299, 126.9644, "한강대로"),
    ("남부순환로", 37.4835, 127.0268, "남부순환로"),
    ("북부간선도로", 37.6121, 127.0165, "북부간선도로"),
    ("동부간선도로", 37.5680, 127.0476, "동부간선도로"),
    ("서부간선도로", 37.5572, 126.9239, "서부간선도로"),
    ("내부순환로", 37.5700, 127.0100, "내부순환로"),
    ("한강대교", 37.5290, 126.9588, "한강대교"),
    ("마포대교", 37.5423, 126.9432, "마포대교"),
    ("원효대교", 37.5307, 126.9494, "원효대교"),
    ("양화대교", 37.5461, 126.9014, "양화대교"),
    ("성수대교", 37.5445, 127.0392, "성수대교"),
    ("영동대교", 37.5200, 127.0520, "영동대교"),
    ("반포대교", 37.5133, 126.9955, "반포대교"),
    ("동작대교", 37.5107, 126.9613, "동작대교"),
];

pub struct GazetteerGeocoder {
    places: &'static [(&'static str, f64, f64, &'static str)],
}

impl GazetteerGeocoder {
    pub fn new() -> Self {
        Self { places: PLACES }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Synchronous lookup. Query is trimmed and lowercased before matching.
    pub fn lookup(&self, query: &str) -> Option<GeocodeResult> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        self.places
            .iter()
            .find(|(key, ..)| normalized.contains(key))
            .map(|&(_, lat, lng, name)| GeocodeResult {
                resolved_address: name.to_string(),
                coordinate: Coordinate::new(lat, lng),
                provider: "gazetteer".into(),
            })
    }
}

impl Default for GazetteerGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for GazetteerGeocoder {
    fn name(&self) -> &str {
        "gazetteer"
    }

    async fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>> {
        Ok(self.lookup(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_lookup() {
        let g = GazetteerGeocoder::new();
        let found = g.lookup("여의도").unwrap();
        assert_eq!(found.resolved_address, "여의도역");
        assert_eq!(found.coordinate, Coordinate::new(37.5219, 126.9245));
        assert_eq!(found.provider, "gazetteer");
    }

    #[test]
    fn test_contained_key_matches() {
        let g = GazetteerGeocoder::new();
        assert_eq!(g.lookup("  강남역 근처  ").unwrap().resolved_address, "강남역");
        assert_eq!(g.lookup("서울대학교 정문").unwrap().resolved_address, "서울대학교");
    }

    #[test]
    fn test_earlier_key_shadows_longer() {
        let g = GazetteerGeocoder::new();
        assert_eq!(g.lookup("마포대교").unwrap().resolved_address, "마포구");
        assert_eq!(g.lookup("강남대로").unwrap().resolved_address, "강남역");
        assert_eq!(g.lookup("동작대교").unwrap().resolved_address, "동작대교");
    }

    #[test]
    fn test_case_insensitive() {
        let g = GazetteerGeocoder::new();
        assert_eq!(g.lookup("N서울타워").unwrap().resolved_address, "N서울타워");
    }

    #[test]
    fn test_unknown_and_blank() {
        let g = GazetteerGeocoder::new();
        assert!(g.lookup("부산 해운대").is_none());
        assert!(g.lookup("   ").is_none());
    }

    #[tokio::test]
    async fn test_geocoder_never_errors() {
        let g = GazetteerGeocoder::new();
        assert!(g.geocode("어딘가").await.unwrap().is_none());
        assert!(g
            .reverse_geocode(&Coordinate::new(37.5, 127.0))
            .await
            .unwrap()
            .is_none());
    }
}
