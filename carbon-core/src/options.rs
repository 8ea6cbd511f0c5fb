//! Fixed choice lists shared by the register form and the regional filter.

/// City preselected on a fresh register form.
pub const DEFAULT_CITY: &str = "高雄市";

/// District preselected on a fresh register form.
pub const DEFAULT_DISTRICT: &str = "仁武區";

/// Cities with their districts, in display order. The first district of each
/// city is the one selected when the user switches to that city.
pub const TAIWAN_PLACES: &[(&str, &[&str])] = &[
    (
        "臺北市",
        &[
            "中正區", "大同區", "中山區", "松山區", "大安區", "萬華區", "信義區", "士林區",
            "北投區", "內湖區", "南港區", "文山區",
        ],
    ),
    (
        "新北市",
        &[
            "板橋區", "三重區", "中和區", "永和區", "新莊區", "新店區", "樹林區", "鶯歌區",
            "三峽區", "淡水區", "汐止區", "瑞芳區", "土城區", "蘆洲區", "五股區", "泰山區",
            "林口區", "深坑區", "石碇區", "坪林區", "三芝區", "石門區", "八里區", "平溪區",
            "雙溪區", "貢寮區", "金山區", "萬里區", "烏來區",
        ],
    ),
    (
        "基隆市",
        &["仁愛區", "信義區", "中正區", "中山區", "安樂區", "暖暖區", "七堵區"],
    ),
    (
        "桃園市",
        &[
            "桃園區", "中壢區", "大溪區", "楊梅區", "蘆竹區", "大園區", "龜山區", "八德區",
            "龍潭區", "平鎮區", "新屋區", "觀音區", "復興區",
        ],
    ),
    ("新竹市", &["東區", "北區", "香山區"]),
    (
        "臺中市",
        &[
            "中區", "東區", "南區", "西區", "北區", "西屯區", "南屯區", "北屯區", "豐原區",
            "東勢區", "大甲區", "清水區", "沙鹿區", "梧棲區", "后里區", "神岡區", "潭子區",
            "大雅區", "新社區", "石岡區", "外埔區", "大安區", "烏日區", "大肚區", "龍井區",
            "霧峰區", "太平區", "大里區", "和平區",
        ],
    ),
    ("嘉義市", &["東區", "西區"]),
    (
        "臺南市",
        &[
            "中西區", "東區", "南區", "北區", "安平區", "安南區", "永康區", "歸仁區", "新化區",
            "左鎮區", "玉井區", "楠西區", "南化區", "仁德區", "關廟區", "龍崎區", "官田區",
            "麻豆區", "佳里區", "西港區", "七股區", "將軍區", "學甲區", "北門區", "新營區",
            "後壁區", "白河區", "東山區", "六甲區", "下營區", "柳營區", "鹽水區", "善化區",
            "大內區", "山上區", "新市區", "安定區",
        ],
    ),
    (
        "高雄市",
        &[
            "新興區", "前金區", "苓雅區", "鹽埕區", "鼓山區", "旗津區", "前鎮區", "三民區",
            "楠梓區", "小港區", "左營區", "仁武區", "大社區", "岡山區", "路竹區", "阿蓮區",
            "田寮區", "燕巢區", "橋頭區", "梓官區", "彌陀區", "永安區", "湖內區", "鳳山區",
            "大寮區", "林園區", "鳥松區", "大樹區", "旗山區", "美濃區", "六龜區", "內門區",
            "杉林區", "甲仙區", "桃源區", "那瑪夏區", "茂林區", "茄萣區",
        ],
    ),
];

/// Occupation choices on the register form; the first is the default.
pub const OCCUPATIONS: &[&str] = &[
    "學生", "軍公教", "服務業", "製造業", "科技業", "金融業", "醫療業", "自由業", "家管",
    "退休", "其他",
];

pub fn cities() -> impl Iterator<Item = &'static str> {
    TAIWAN_PLACES.iter().map(|(city, _)| *city)
}

pub fn districts(city: &str) -> Option<&'static [&'static str]> {
    TAIWAN_PLACES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, districts)| *districts)
}

/// District to select after switching to `city`.
pub fn first_district(city: &str) -> Option<&'static str> {
    districts(city).and_then(|d| d.first().copied())
}

pub fn is_district_of(
    city: &str,
    district: &str,
) -> bool {
    districts(city).is_some_and(|d| d.contains(&district))
}
