//! Bundled destination and airline tables.
//!
//! Canonical values are the Traditional Chinese names used by the deal sites.
//! Entries are `(english, chinese)`; aliases are `(term, canonical targets)`.

pub(super) static DESTINATIONS: &[(&str, &str)] = &[
    ("Taiwan", "台灣"),
    ("Japan", "日本"),
    ("Korea", "韓國"),
    ("Thailand", "泰國"),
    ("Singapore", "新加坡"),
    ("Malaysia", "馬來西亞"),
    ("Vietnam", "越南"),
    ("Philippines", "菲律賓"),
    ("Indonesia", "印尼"),
    ("Cambodia", "柬埔寨"),
    ("Laos", "老撾"),
    ("Myanmar", "緬甸"),
    ("Brunei", "汶萊"),
    ("India", "印度"),
    ("Nepal", "尼泊爾"),
    ("Sri Lanka", "斯里蘭卡"),
    ("China", "中國"),
    ("Macau", "澳門"),
    ("Mongolia", "蒙古"),
    ("Russia", "俄羅斯"),
    ("Australia", "澳洲"),
    ("New Zealand", "紐西蘭"),
    ("United States", "美國"),
    ("Canada", "加拿大"),
    ("United Kingdom", "英國"),
    ("Ireland", "愛爾蘭"),
    ("France", "法國"),
    ("Germany", "德國"),
    ("Italy", "意大利"),
    ("Spain", "西班牙"),
    ("Portugal", "葡萄牙"),
    ("Netherlands", "荷蘭"),
    ("Belgium", "比利時"),
    ("Switzerland", "瑞士"),
    ("Austria", "奧地利"),
    ("Czech Republic", "捷克"),
    ("Poland", "波蘭"),
    ("Hungary", "匈牙利"),
    ("Greece", "希臘"),
    ("Norway", "挪威"),
    ("Sweden", "瑞典"),
    ("Finland", "芬蘭"),
    ("Iceland", "冰島"),
    ("Turkey", "土耳其"),
    ("Egypt", "埃及"),
    ("South Africa", "南非"),
    ("Brazil", "巴西"),
    ("Argentina", "阿根廷"),
    ("Chile", "智利"),
    ("Mexico", "墨西哥"),
    ("Peru", "秘魯"),
    ("Colombia", "哥倫比亞"),
    ("Ecuador", "厄瓜多爾"),
    ("Panama", "巴拿馬"),
    ("Costa Rica", "哥斯達黎加"),
    ("Cuba", "古巴"),
    ("Dominican Republic", "多米尼加"),
    ("Puerto Rico", "波多黎各"),
    ("Jamaica", "牙買加"),
    ("Trinidad and Tobago", "千里達及托巴哥"),
    ("Barbados", "巴貝多"),
    ("Bahamas", "巴哈馬"),
    ("Bermuda", "百慕達"),
    ("Fiji", "斐濟"),
    ("Jordan", "約旦"),
    ("Maldives", "馬爾代夫"),
    ("Papua New Guinea", "巴布亞新畿內亞"),
    ("Azerbaijan", "阿塞拜疆"),
    ("Armenia", "亞美尼亞"),
    ("Kazakhstan", "哈薩克"),
    ("Uzbekistan", "烏茲別克斯坦"),
    ("Dubai", "杜拜"),
];

pub(super) static DESTINATION_ALIASES: &[(&str, &[&str])] = &[
    // Regions
    ("澳紐", &["澳洲", "紐西蘭"]),
    ("美加", &["美國", "加拿大"]),
    ("星馬", &["新加坡", "馬來西亞"]),
    ("泰柬", &["泰國", "柬埔寨"]),
    ("越柬", &["越南", "柬埔寨"]),
    ("越泰", &["越南", "泰國"]),
    (
        "東南亞",
        &["新加坡", "馬來西亞", "泰國", "柬埔寨", "越南", "印尼", "老撾", "緬甸", "菲律賓", "汶萊"],
    ),
    ("新西蘭", &["紐西蘭"]),
    // Cities
    ("奧克蘭", &["紐西蘭"]),
    ("惠靈頓", &["紐西蘭"]),
    ("基督城", &["紐西蘭"]),
    ("北京", &["中國"]),
    ("台中", &["台灣"]),
    ("台北", &["台灣"]),
    ("台南", &["台灣"]),
    ("峴港", &["越南"]),
    ("胡志明市", &["越南"]),
    ("芽莊", &["越南"]),
    ("河內", &["越南"]),
    ("首爾", &["韓國"]),
    ("釜山", &["韓國"]),
    ("濟州", &["韓國"]),
    ("東京", &["日本"]),
    ("大阪", &["日本"]),
    ("名古屋", &["日本"]),
    ("福岡", &["日本"]),
    ("高松", &["日本"]),
    ("鹿兒島", &["日本"]),
    ("熊本", &["日本"]),
    ("沖繩", &["日本"]),
    ("札幌", &["日本"]),
    ("仙台", &["日本"]),
    ("廣島", &["日本"]),
    ("北海道", &["日本"]),
    ("布吉", &["泰國"]),
    ("曼谷", &["泰國"]),
    ("清邁", &["泰國"]),
    ("吉隆坡", &["馬來西亞"]),
    ("檳城", &["馬來西亞"]),
    ("馬尼拉", &["菲律賓"]),
    ("宿霧", &["菲律賓"]),
    ("長灘島", &["菲律賓"]),
    ("雅加達", &["印尼"]),
    ("巴里", &["印尼"]),
    ("峇里島", &["印尼"]),
    ("珀斯", &["澳洲"]),
    ("雪梨", &["澳洲"]),
    ("悉尼", &["澳洲"]),
    ("墨爾本", &["澳洲"]),
    ("布里斯班", &["澳洲"]),
    ("阿德雷德", &["澳洲"]),
    ("達爾文", &["澳洲"]),
    ("堪培拉", &["澳洲"]),
    ("霍巴特", &["澳洲"]),
    ("巴塞隆拿", &["西班牙"]),
    ("馬德里", &["西班牙"]),
    ("巴黎", &["法國"]),
    ("倫敦", &["英國"]),
    ("曼徹斯特", &["英國"]),
    ("愛丁堡", &["英國"]),
    ("都柏林", &["愛爾蘭"]),
    ("羅馬", &["意大利"]),
    ("米蘭", &["意大利"]),
    ("佛羅倫斯", &["意大利"]),
    ("威尼斯", &["意大利"]),
    ("維也納", &["奧地利"]),
    ("薩爾茨堡", &["奧地利"]),
    ("慕尼黑", &["德國"]),
    ("柏林", &["德國"]),
    ("漢堡", &["德國"]),
    ("法蘭克福", &["德國"]),
    ("科隆", &["德國"]),
    ("杜塞爾多夫", &["德國"]),
    ("斯圖加特", &["德國"]),
    ("漢諾威", &["德國"]),
    ("紐倫堡", &["德國"]),
    ("布拉格", &["捷克"]),
    ("布達佩斯", &["匈牙利"]),
    ("華沙", &["波蘭"]),
    ("克拉科夫", &["波蘭"]),
    ("雅典", &["希臘"]),
    ("伊斯坦堡", &["土耳其"]),
    ("里斯本", &["葡萄牙"]),
    ("馬德拉", &["葡萄牙"]),
    ("波爾圖", &["葡萄牙"]),
    ("布魯塞爾", &["比利時"]),
    ("日內瓦", &["瑞士"]),
    ("蘇黎世", &["瑞士"]),
    ("巴塞爾", &["瑞士"]),
    ("阿姆斯特丹", &["荷蘭"]),
    ("鹿特丹", &["荷蘭"]),
    ("馬斯垂克", &["荷蘭"]),
    ("奧斯陸", &["挪威"]),
    ("斯德哥爾摩", &["瑞典"]),
    ("赫爾辛基", &["芬蘭"]),
    ("雷克雅維克", &["冰島"]),
    ("開羅", &["埃及"]),
    ("開普敦", &["南非"]),
    ("約翰內斯堡", &["南非"]),
    ("紐約", &["美國"]),
    ("洛杉磯", &["美國"]),
    ("三藩市", &["美國"]),
    ("芝加哥", &["美國"]),
    ("西雅圖", &["美國"]),
    ("波士頓", &["美國"]),
    ("華盛頓", &["美國"]),
    ("奧蘭多", &["美國"]),
    ("邁阿密", &["美國"]),
    ("拉斯維加斯", &["美國"]),
    ("夏威夷", &["美國"]),
    ("多倫多", &["加拿大"]),
    ("溫哥華", &["加拿大"]),
    ("蒙特婁", &["加拿大"]),
    ("卡爾加里", &["加拿大"]),
    ("埃德蒙頓", &["加拿大"]),
    ("渥太華", &["加拿大"]),
    ("魁北克", &["加拿大"]),
    ("溫尼伯", &["加拿大"]),
    ("維多利亞", &["加拿大"]),
    ("莫爾斯比港", &["巴布亞新畿內亞"]),
];

pub(super) static AIRLINES: &[(&str, &str)] = &[
    ("AirAsia", "亞洲航空"),
    ("Cathay Pacific", "國泰航空"),
    ("EVA Air", "長榮航空"),
    ("Hong Kong Airlines", "香港航空"),
    ("Batik Air", "巴澤航空"),
    ("Cebu Pacific", "宿霧太平洋航空"),
    ("China Airlines", "中華航空"),
    ("China Eastern Airlines", "中國東方航空"),
    ("China Southern Airlines", "中國南方航空"),
    ("Garuda Indonesia", "印尼鷹航"),
    ("Jetstar Airways", "捷星航空"),
    ("Jetstar Asia Airways", "捷星亞洲航空"),
    ("Jetstar Japan", "捷星日本航空"),
    ("Malaysia Airlines", "馬來西亞航空"),
    ("HK Express", "香港快運航空"),
    ("Air France", "法國航空"),
    ("KLM Royal Dutch Airlines", "荷蘭皇家航空"),
    ("British Airways", "英國航空"),
    ("Peach Aviation", "樂桃航空"),
    ("Qantas", "澳洲航空"),
    ("Jeju Air", "濟州航空"),
    ("Korean Air", "大韓航空"),
    ("Asiana Airlines", "韓亞航空"),
    ("Air Busan", "釜山航空"),
    ("T'way Air", "德威航空"),
    ("United Airlines", "聯合航空"),
    ("Air Canada", "加拿大航空"),
    ("Emirates", "阿聯酋航空"),
    ("Riyadh Air", "利雅得航空"),
    ("Qatar Airways", "卡塔爾航空"),
    ("Etihad Airways", "阿提哈德航空"),
    ("Turkish Airlines", "土耳其航空"),
    ("Royal Jordanian", "皇家約旦航空"),
    ("Scoot", "酷航"),
    ("Thai Airways", "泰國航空"),
    ("Thai Lion Air", "泰國獅子航空"),
    ("Thai Cool Airlines", "泰酷航空"),
    ("Bangkok Airways", "曼谷航空"),
    ("Cathay Dragon", "港龍航空"),
    ("Starlux Airlines", "星宇航空"),
    ("Tigerair Taiwan", "台灣虎航"),
    ("Royal Air Philippines", "菲律賓皇家航空"),
    ("Vietjet Air", "越捷航空"),
    ("All Nippon Airways", "全日空"),
    ("Japan Airlines", "日本航空"),
    ("Fiji Airways", "斐濟航空"),
    ("Vistara", "Vistara"),
    ("Greater Bay Airlines", "大灣區航空"),
    ("Finnair", "芬蘭航空"),
    ("Air New Zealand", "新西蘭航空"),
    ("Air Niugini", "新畿內亞航空"),
    ("Air Macau", "澳門航空"),
];

pub(super) static AIRLINE_ALIASES: &[(&str, &[&str])] = &[
    ("亞航", &["亞洲航空"]),
    ("國泰", &["國泰航空"]),
    ("澳航", &["澳洲航空"]),
    ("長榮", &["長榮航空"]),
    ("華航", &["中華航空"]),
    ("中華", &["中華航空"]),
    ("馬航", &["馬來西亞航空"]),
    ("馬來西亞國際航空", &["馬來西亞航空"]),
    ("南方航空", &["中國南方航空"]),
    ("港航", &["香港航空"]),
    ("泰航", &["泰國航空"]),
    ("日航", &["日本航空"]),
    ("荷航", &["荷蘭皇家航空"]),
    ("法航", &["法國航空"]),
    ("英航", &["英國航空"]),
    ("加航", &["加拿大航空"]),
    ("澳洲", &["澳洲航空"]),
    ("UO", &["香港快運航空"]),
    ("ANA", &["全日空"]),
];
